use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::model::ModelError;

/// Errors surfaced to HTTP clients as `{"detail": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Model missing")]
    ModelUnavailable,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Inference failed: {0}")]
    Inference(#[from] ModelError),
}

impl ApiError {
    fn detail(&self) -> Value {
        match self {
            ApiError::ModelUnavailable => json!("Model missing"),
            ApiError::InvalidBody(msg) => json!([{
                "loc": ["body"],
                "msg": msg,
                "type": "json_invalid",
            }]),
            ApiError::Validation(errors) => validation_detail(errors),
            ApiError::Inference(e) => json!(e.to_string()),
        }
    }
}

/// One `{loc, msg, type}` entry per violated rule, ordered by field name.
fn validation_detail(errors: &ValidationErrors) -> Value {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    let entries = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                json!({
                    "loc": ["body", field.to_string()],
                    "msg": msg,
                    "type": e.code.to_string(),
                })
            })
        })
        .collect::<Vec<_>>();
    Value::Array(entries)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InvalidBody(_) | ApiError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Inference(e) = self {
            log::error!("Prediction failed: {}", e);
        }
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.detail() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io_struct::WineInput;
    use validator::Validate;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::ModelUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::InvalidBody("bad".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Inference(ModelError::FeatureMismatch {
                expected: 5,
                got: 4
            })
            .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_detail_lists_each_field() {
        let mut input = WineInput::example();
        input.alcohol = 0.0;
        input.chlorides = -1.0;
        let err = ApiError::from(input.validate().unwrap_err());

        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let detail = err.detail();
        let entries = detail.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["loc"], json!(["body", "alcohol"]));
        assert_eq!(entries[0]["msg"], json!("must be greater than 0"));
        assert_eq!(entries[0]["type"], json!("range"));
        assert_eq!(entries[1]["loc"], json!(["body", "chlorides"]));
    }
}
