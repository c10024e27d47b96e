//! Model Gateway - owns the single classifier instance
//!
//! Loaded once before the server binds. A failed load leaves the gateway
//! disabled for the rest of the process; there is no reload path.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::artifact::ModelArtifact;
use super::classifier::Classifier;
use crate::error::{ModelError, PredictError, PredictResult};
use crate::models::{FeatureVector, Label};

/// Where the classifier came from
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    /// SHA-256 of the artifact bytes
    pub checksum: String,
    pub loaded_at: DateTime<Utc>,
}

/// Gateway status for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GatewayStatus {
    pub model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ModelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_reason: Option<String>,
    pub inference_count: u64,
    pub avg_latency_us: f64,
}

enum GatewayState {
    Ready {
        classifier: Arc<dyn Classifier>,
        metadata: ModelMetadata,
    },
    Disabled {
        reason: String,
    },
}

pub struct ModelGateway {
    state: GatewayState,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl ModelGateway {
    fn with_state(state: GatewayState) -> Self {
        Self {
            state,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        }
    }

    /// Read and validate the artifact at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        tracing::info!("Loading model artifact from: {}", path.display());

        let bytes = std::fs::read(path)?;
        let checksum = hex::encode(Sha256::digest(&bytes));
        let classifier = ModelArtifact::from_slice(&bytes)?.into_classifier()?;

        let metadata = ModelMetadata {
            model_path: path.display().to_string(),
            model_type: classifier.kind().to_string(),
            checksum,
            loaded_at: Utc::now(),
        };
        tracing::info!(
            model_type = %metadata.model_type,
            checksum = %metadata.checksum,
            "Model loaded successfully"
        );

        Ok(Self::with_state(GatewayState::Ready {
            classifier: Arc::from(classifier),
            metadata,
        }))
    }

    /// Like `load`, but a failure yields a permanently disabled gateway
    pub fn load_or_disable(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(gateway) => gateway,
            Err(e) => {
                tracing::error!("Model '{}' could not be loaded: {}", path.display(), e);
                Self::disabled(e.to_string())
            }
        }
    }

    /// Wrap an already constructed classifier
    pub fn from_classifier(classifier: Arc<dyn Classifier>) -> Self {
        let metadata = ModelMetadata {
            model_path: "<memory>".to_string(),
            model_type: classifier.kind().to_string(),
            checksum: String::new(),
            loaded_at: Utc::now(),
        };
        Self::with_state(GatewayState::Ready { classifier, metadata })
    }

    pub fn disabled(reason: impl Into<String>) -> Self {
        Self::with_state(GatewayState::Disabled { reason: reason.into() })
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, GatewayState::Ready { .. })
    }

    pub fn classify(&self, features: &FeatureVector) -> PredictResult<Label> {
        let classifier = match &self.state {
            GatewayState::Ready { classifier, .. } => classifier,
            GatewayState::Disabled { .. } => return Err(PredictError::ModelUnavailable),
        };

        let start = Instant::now();
        let result = classifier.classify(features);

        self.latency_sum_us
            .fetch_add(start.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(result?)
    }

    pub fn status(&self) -> GatewayStatus {
        let count = self.inference_count.load(Ordering::Relaxed);
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let avg = if count > 0 { sum as f64 / count as f64 } else { 0.0 };

        let (metadata, disabled_reason) = match &self.state {
            GatewayState::Ready { metadata, .. } => (Some(metadata.clone()), None),
            GatewayState::Disabled { reason } => (None, Some(reason.clone())),
        };

        GatewayStatus {
            model_loaded: self.is_loaded(),
            metadata,
            disabled_reason,
            inference_count: count,
            avg_latency_us: avg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Failing, Fixed};
    use std::io::Write;

    fn sample() -> FeatureVector {
        FeatureVector::new(0.1, 0.2, 0.3).unwrap()
    }

    fn artifact_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file_records_metadata() {
        let file = artifact_file(
            r#"{"format_version":1,"n_features":3,
                "model":{"type":"logistic_regression","coefficients":[1.0,1.0,1.0],"intercept":-10.0}}"#,
        );
        let gateway = ModelGateway::load(file.path()).unwrap();
        assert!(gateway.is_loaded());
        assert_eq!(gateway.classify(&sample()).unwrap(), Label::Normal);

        let status = gateway.status();
        let metadata = status.metadata.unwrap();
        assert_eq!(metadata.model_type, "logistic_regression");
        assert_eq!(metadata.checksum.len(), 64);
        assert_eq!(status.inference_count, 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelGateway::load(dir.path().join("model.json"));
        assert!(matches!(result, Err(ModelError::Io(_))));
    }

    #[test]
    fn test_load_corrupt_file_is_parse_error() {
        let file = artifact_file("\u{80}PICKLE");
        assert!(matches!(ModelGateway::load(file.path()), Err(ModelError::Parse(_))));
    }

    #[test]
    fn test_failed_load_disables_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = ModelGateway::load_or_disable(dir.path().join("absent.json"));
        assert!(!gateway.is_loaded());
        assert_eq!(gateway.classify(&sample()), Err(PredictError::ModelUnavailable));

        let status = gateway.status();
        assert!(status.disabled_reason.unwrap().contains("failed to read model artifact"));
        assert_eq!(status.inference_count, 0);
    }

    #[test]
    fn test_classifier_failure_becomes_inference_error() {
        let gateway = ModelGateway::from_classifier(Arc::new(Failing("matrix shape mismatch")));
        assert_eq!(
            gateway.classify(&sample()),
            Err(PredictError::Inference("matrix shape mismatch".to_string()))
        );
    }

    #[test]
    fn test_classify_is_deterministic_and_counted() {
        let gateway = ModelGateway::from_classifier(Arc::new(Fixed(Label::Fault)));
        for _ in 0..3 {
            assert_eq!(gateway.classify(&sample()).unwrap(), Label::Fault);
        }
        let status = gateway.status();
        assert_eq!(status.inference_count, 3);
        assert_eq!(status.metadata.unwrap().model_type, "fixed");
    }
}
