use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Interpretation, RecognitionResult};
use crate::services::nlu;
use crate::state::AppState;

// POST /api/interpret
pub async fn interpret_result(
    payload: Result<Json<RecognitionResult>, JsonRejection>,
) -> Result<Json<Interpretation>, AppError> {
    let Json(result) = payload?;
    let interpretation = nlu::interpret(&result).map_err(|e| {
        tracing::warn!(error = %e, "failed to interpret recognition result");
        e
    })?;
    Ok(Json(interpretation))
}

// POST /api/query
#[derive(Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

pub async fn query(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<Interpretation>, AppError> {
    let Json(req) = payload?;
    let text = req.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("text must not be empty".to_string()));
    }

    tracing::info!(
        text = %text,
        host = %state.config.luis_api_host_name,
        "incoming utterance"
    );

    let interpretation = nlu::execute_query(state.recognizer.as_ref(), text)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to interpret utterance");
            e
        })?;
    Ok(Json(interpretation))
}
