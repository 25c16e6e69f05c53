use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::error::ApiError;
use crate::connector::api::{timestamp_now, Container, ServiceHealth};

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    success: bool,
    response: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    images: Vec<String>,
    timestamp: String,
}

/// `POST /chat`
pub async fn post_chat(
    State(container): State<Arc<Container>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Request body must be valid JSON: {e}")))?;

    let result = container
        .chat_turn_use_case()
        .handle(&payload)
        .await
        .map_err(|e| ApiError::from_domain(e, container.dev_mode()))?;

    info!(
        "Replied with {} chars and {} images",
        result.reply_text().len(),
        result.images().len()
    );

    Ok(Json(ChatResponse {
        success: true,
        response: result.reply_text().to_string(),
        images: result.images().to_vec(),
        timestamp: timestamp_now(),
    }))
}

/// `GET /chat`
pub async fn get_health(State(container): State<Arc<Container>>) -> Json<ServiceHealth> {
    Json(container.health())
}
