//! Inference Module - classifier loading and evaluation
//!
//! The artifact format lives in `artifact`, the evaluators in `classifier`,
//! and `gateway` owns the one loaded instance for the process lifetime.

pub mod artifact;
pub mod classifier;
pub mod gateway;

// Re-export common types
pub use classifier::Classifier;
pub use gateway::{GatewayStatus, ModelGateway};
