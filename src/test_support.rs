//! Classifier doubles shared by the unit and router tests

use std::sync::Mutex;

use crate::error::InferenceError;
use crate::inference::Classifier;
use crate::models::{FeatureVector, Label};

/// Always answers with the same label
pub struct Fixed(pub Label);

impl Classifier for Fixed {
    fn classify(&self, _: &FeatureVector) -> Result<Label, InferenceError> {
        Ok(self.0)
    }

    fn kind(&self) -> &'static str {
        "fixed"
    }
}

/// Always fails with the given cause
pub struct Failing(pub &'static str);

impl Classifier for Failing {
    fn classify(&self, _: &FeatureVector) -> Result<Label, InferenceError> {
        Err(InferenceError(self.0.to_string()))
    }

    fn kind(&self) -> &'static str {
        "failing"
    }
}

/// Fixed label, remembering the last vector it saw
pub struct Recording {
    label: Label,
    seen: Mutex<Option<FeatureVector>>,
}

impl Recording {
    pub fn new(label: Label) -> Self {
        Self { label, seen: Mutex::new(None) }
    }

    pub fn last_seen(&self) -> Option<FeatureVector> {
        *self.seen.lock().unwrap()
    }
}

impl Classifier for Recording {
    fn classify(&self, features: &FeatureVector) -> Result<Label, InferenceError> {
        *self.seen.lock().unwrap() = Some(*features);
        Ok(self.label)
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}
