use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Application failure. Sent with 200 so clients surface the message
    /// instead of treating it as a transport fault.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

pub const PROCESSING_PREFIX: &str = "Erro no processamento: ";

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(format!("{PROCESSING_PREFIX}{}", rejection.body_text()))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("response from '{url}' is not JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from '{url}' has no boolean 'success' field")]
    Envelope { url: String },

    #[error("request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
