//! Prediction handler
//!
//! Every outcome, including every error, renders the same page with a
//! message; the response status is always 200.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Html,
    Form,
};

use crate::error::{PredictError, PredictResult};
use crate::inference::ModelGateway;
use crate::models::{Label, PredictForm};
use crate::view::render_index;
use crate::AppState;

pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Html<String> {
    let message = match form {
        Ok(Form(pairs)) => diagnosis_message(&state.gateway, &PredictForm::from_pairs(pairs)),
        Err(rejection) => {
            tracing::warn!("Rejected prediction form: {}", rejection);
            if state.gateway.is_loaded() {
                PredictError::InvalidInput.user_message()
            } else {
                PredictError::ModelUnavailable.user_message()
            }
        }
    };

    render_index(Some(&message))
}

/// Run one request through the gateway and produce the text to display
pub fn diagnosis_message(gateway: &ModelGateway, form: &PredictForm) -> String {
    match diagnose(gateway, form) {
        Ok(label) => {
            tracing::debug!(label = label.as_class(), "Prediction served");
            label.message().to_string()
        }
        Err(e) => {
            tracing::warn!("Prediction failed: {}", e);
            e.user_message()
        }
    }
}

fn diagnose(gateway: &ModelGateway, form: &PredictForm) -> PredictResult<Label> {
    // A disabled gateway wins over bad input
    if !gateway.is_loaded() {
        return Err(PredictError::ModelUnavailable);
    }
    let features = form.to_features()?;
    gateway.classify(&features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixed;
    use std::sync::Arc;

    fn form(x: &str, y: &str, z: &str) -> PredictForm {
        PredictForm {
            x_direction: Some(x.to_string()),
            y_direction: Some(y.to_string()),
            z_direction: Some(z.to_string()),
        }
    }

    #[test]
    fn test_label_selects_message() {
        let fault = ModelGateway::from_classifier(Arc::new(Fixed(Label::Fault)));
        let normal = ModelGateway::from_classifier(Arc::new(Fixed(Label::Normal)));

        assert_eq!(diagnosis_message(&fault, &form("0.1", "0.2", "0.3")), Label::Fault.message());
        assert_eq!(diagnosis_message(&normal, &form("0.1", "0.2", "0.3")), Label::Normal.message());
    }

    #[test]
    fn test_disabled_gateway_ignores_input() {
        let gateway = ModelGateway::disabled("no artifact");
        let unavailable = PredictError::ModelUnavailable.user_message();

        assert_eq!(diagnosis_message(&gateway, &form("0.1", "0.2", "0.3")), unavailable);
        assert_eq!(diagnosis_message(&gateway, &form("abc", "", "x")), unavailable);
        assert_eq!(diagnosis_message(&gateway, &PredictForm::default()), unavailable);
    }

    #[test]
    fn test_input_errors_are_reported() {
        let gateway = ModelGateway::from_classifier(Arc::new(Fixed(Label::Fault)));

        let missing = PredictForm {
            z_direction: None,
            ..form("1", "2", "3")
        };
        assert!(diagnosis_message(&gateway, &missing).ends_with("Missing: 'z-direction'"));
        assert_eq!(
            diagnosis_message(&gateway, &form("1", "abc", "3")),
            PredictError::InvalidInput.user_message()
        );
        // nothing reached the classifier
        assert_eq!(gateway.status().inference_count, 0);
    }
}
