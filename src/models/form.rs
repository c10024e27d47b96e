//! Prediction form submitted by the index page

use super::features::FeatureVector;
use crate::error::{PredictError, PredictResult};

pub const X_FIELD: &str = "x-direction";
pub const Y_FIELD: &str = "y-direction";
pub const Z_FIELD: &str = "z-direction";

/// Raw form fields; each may be absent from the request body
#[derive(Debug, Default)]
pub struct PredictForm {
    pub x_direction: Option<String>,
    pub y_direction: Option<String>,
    pub z_direction: Option<String>,
}

impl PredictForm {
    /// Collect the readings from decoded form pairs.
    ///
    /// A repeated field keeps its first value; unknown fields are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                X_FIELD => &mut form.x_direction,
                Y_FIELD => &mut form.y_direction,
                Z_FIELD => &mut form.z_direction,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }

    /// Validate and convert the three readings.
    ///
    /// Each field is looked up and parsed before the next one is read, so a
    /// bad x value is reported even when y is absent.
    pub fn to_features(&self) -> PredictResult<FeatureVector> {
        let x = parse_reading(required(X_FIELD, &self.x_direction)?)?;
        let y = parse_reading(required(Y_FIELD, &self.y_direction)?)?;
        let z = parse_reading(required(Z_FIELD, &self.z_direction)?)?;

        FeatureVector::new(x, y, z)
    }
}

fn required<'a>(name: &'static str, value: &'a Option<String>) -> PredictResult<&'a str> {
    value.as_deref().ok_or(PredictError::MissingField(name))
}

fn parse_reading(raw: &str) -> PredictResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(PredictError::InvalidInput)
}
