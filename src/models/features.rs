//! Feature vector and label types shared by the handler and the classifier

use serde::Serialize;

use crate::error::{PredictError, PredictResult};

/// Number of readings the classifier consumes (x, y, z)
pub const FEATURE_COUNT: usize = 3;

/// Directional readings of one sample, always finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Build a vector, rejecting NaN and infinities
    pub fn new(x: f64, y: f64, z: f64) -> PredictResult<Self> {
        let values = [x, y, z];
        if values.iter().all(|v| v.is_finite()) {
            Ok(Self(values))
        } else {
            Err(PredictError::InvalidInput)
        }
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Binary classifier output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// 0 - printer is fine
    Normal,
    /// 1 - printer might be faulty
    Fault,
}

impl Label {
    pub fn from_class(class: u8) -> Option<Self> {
        match class {
            0 => Some(Label::Normal),
            1 => Some(Label::Fault),
            _ => None,
        }
    }

    pub fn as_class(self) -> u8 {
        match self {
            Label::Normal => 0,
            Label::Fault => 1,
        }
    }

    /// Diagnostic text rendered for this label
    pub fn message(self) -> &'static str {
        match self {
            Label::Fault => "Yes, There might be a problem in the 3D Printer. Please check.",
            Label::Normal => "No, There is no problem in the 3D Printer. You can continue working.",
        }
    }
}
