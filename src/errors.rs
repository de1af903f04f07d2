use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Failures of the interpretation pipeline. Each stage reports its own
/// variant so callers can tell a real `None` intent from a broken turn.
#[derive(Debug, thiserror::Error)]
pub enum InterpretError {
    #[error("recognition error: {0}")]
    Recognition(String),

    #[error("date resolution error: {0}")]
    DateResolution(String),

    #[error("recognizer call failed: {0:#}")]
    RecognitionFailure(#[from] anyhow::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Interpret(InterpretError::RecognitionFailure(_)) => StatusCode::BAD_GATEWAY,
            AppError::Interpret(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Body(rejection) => rejection.status(),
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
