use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use thiserror::Error;

/// Only authorization and validation failures are surfaced to webhook callers; everything
/// downstream of the verification decision is absorbed by the dispatch layer.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid webhook signature")]
    InvalidSignature,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid value for field {field}. {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Could not read request body. {0}")]
    InvalidRequestBody(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Unspecified error. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidSignature => StatusCode::FORBIDDEN,
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "status": "error", "message": self.to_string() }).to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(ServerError::InvalidSignature.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ServerError::MissingField("amount").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ServerError::InvalidField { field: "amount", reason: "nope".to_string() }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ServerError::Unspecified("x".to_string()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_responses_use_the_wire_shape() {
        let response = ServerError::MissingField("amount").error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers().get("content-type").unwrap(), "application/json");
    }
}
