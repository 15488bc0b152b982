use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failures the fetch pipeline can surface. Both are terminal for the current
/// request; nothing is retried and nothing is cached after either.
#[derive(Debug, Error)]
pub enum ComicError {
    #[error("error while fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no comic for {requested}: {detail}")]
    Validation { requested: String, detail: String },
}

impl ComicError {
    pub fn kind(&self) -> &'static str {
        match self {
            ComicError::Fetch { .. } => "fetch",
            ComicError::Validation { .. } => "validation",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "bad_request",
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ComicError> for AppError {
    fn from(err: ComicError) -> Self {
        let status = match &err {
            ComicError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            ComicError::Validation { .. } => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(json!({ "error": self.message, "kind": self.kind }));
        (self.status, body).into_response()
    }
}
