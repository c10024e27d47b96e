//! Error handling

use thiserror::Error;

pub type PredictResult<T> = Result<T, PredictError>;

/// Failures while loading the classifier artifact
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("incompatible model artifact: {0}")]
    Incompatible(String),
}

/// Failure raised by a classifier while evaluating a feature vector
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Everything that can go wrong while serving a single prediction request
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("model is not loaded")]
    ModelUnavailable,

    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("non-numeric form input")]
    InvalidInput,

    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    /// Text shown to the user in place of the diagnosis
    pub fn user_message(&self) -> String {
        match self {
            PredictError::ModelUnavailable => {
                "Error: The prediction model could not be loaded. Please contact support.".to_string()
            }
            PredictError::MissingField(field) => format!(
                "Error: Missing form data. Please ensure all fields are filled. Missing: '{}'",
                field
            ),
            PredictError::InvalidInput => {
                "Error: Invalid input. Please enter numeric values for all fields.".to_string()
            }
            PredictError::Inference(cause) => {
                format!("An error occurred during prediction: {}", cause)
            }
        }
    }
}

impl From<InferenceError> for PredictError {
    fn from(err: InferenceError) -> Self {
        PredictError::Inference(err.0)
    }
}
