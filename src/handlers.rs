use crate::cycle::markup::paragraphs;
use crate::demo;
use crate::errors::{AppError, PROCESSING_PREFIX};
use crate::ideas;
use crate::models::{ChatRequest, ContentIdeasForm};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

pub const EMPTY_MESSAGE: &str = "Mensagem não pode estar vazia";
pub const MISSING_FIELDS: &str = "Todos os campos obrigatórios devem ser preenchidos";

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.inspect_err(|err| warn!("chat body rejected: {err}"))?;
    let message = payload.message.trim();
    if message.is_empty() {
        return Err(AppError::rejected(EMPTY_MESSAGE));
    }

    let response = demo::chat_reply(message, state.next_rotation());
    let response_html = paragraphs(&response).into_string();
    info!(
        history = payload.conversation_history.len(),
        "demo chat reply"
    );

    Ok(Json(json!({
        "success": true,
        "response": response,
        "response_html": response_html,
        "is_demo": true,
    })))
}

pub async fn content_ideas(
    State(state): State<AppState>,
    payload: Result<Json<ContentIdeasForm>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(form) = payload.inspect_err(|err| warn!("content ideas body rejected: {err}"))?;
    let quantity = form.quantity().map_err(|err| {
        warn!(quantity = %form.quantity, "bad quantity: {err}");
        AppError::rejected(format!(
            "{PROCESSING_PREFIX}quantidade inválida '{}'",
            form.quantity.trim()
        ))
    })?;

    let missing = form.missing_fields();
    if !missing.is_empty() {
        info!(?missing, "content ideas request incomplete");
        return Err(AppError::rejected(MISSING_FIELDS));
    }

    let ideas = ideas::generate(&form, quantity, state.next_rotation());
    info!(count = ideas.len(), content_type = %form.content_type, "content ideas generated");

    Ok(Json(json!({
        "success": true,
        "ideas": ideas,
        "content_type": form.content_type.trim(),
        "platform": form.platform.trim(),
        "tone": form.tone.trim(),
    })))
}

pub async fn dashboard_data(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let data = serde_json::to_value(state.dashboard.as_ref()).map_err(AppError::internal)?;
    Ok(Json(json!({ "success": true, "data": data })))
}
