//! 3D Printer Fault Diagnosis Server
//!
//! Web form over a pre-trained binary classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 PRINTER DIAGNOSIS                    │
//! ├──────────────────────────────────────────────────────┤
//! │  GET /  ──────►  view (form page)                    │
//! │                                                      │
//! │  POST /predict ─► PredictForm ─► FeatureVector       │
//! │                                     │                │
//! │                                     ▼                │
//! │                              ┌──────────────┐        │
//! │                              │ ModelGateway │        │
//! │                              │ (Classifier) │        │
//! │                              └──────┬───────┘        │
//! │                                     ▼                │
//! │                      Label / PredictError ─► message │
//! └──────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod inference;
mod models;
mod view;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use inference::ModelGateway;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    init_tracing(&config);

    tracing::info!("Printer diagnosis server starting...");

    // Model is loaded exactly once; failure leaves the gateway disabled
    let gateway = ModelGateway::load_or_disable(&config.model_path);
    if !gateway.is_loaded() {
        tracing::warn!("Serving without a model: every prediction will report it unavailable");
    }

    let state = AppState {
        gateway: Arc::new(gateway),
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "printer_diagnosis=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<ModelGateway>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/predict", post(handlers::predict::predict))
        .route("/health", get(handlers::health::check))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
