//! Public chat relay route.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use atelier_core::{ChatRole, ChatTurn};

use crate::error::AppError;
use crate::state::AppState;

/// Cap on resent history; the widget trims client-side, this is the
/// server-side backstop.
const MAX_TURNS: usize = 40;

/// Chat relay payload: the full conversation so far, oldest first.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatTurn>,
}

/// Forward a conversation to the model provider and return its reply.
///
/// The relay is stateless: no conversation is stored, and the reply is
/// returned verbatim, contact-card marker included. Rendering decisions
/// belong to the widget.
///
/// POST /api/chat
#[instrument(skip(state, request), fields(turns = request.messages.len()))]
pub async fn relay(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<Value>, AppError> {
    let Some(chat) = state.chat() else {
        return Err(AppError::Internal("chat provider not configured".into()));
    };

    if request.messages.is_empty() {
        return Err(AppError::BadRequest("messages must not be empty".into()));
    }
    if request.messages.len() > MAX_TURNS {
        return Err(AppError::BadRequest(format!(
            "conversation too long, at most {MAX_TURNS} turns"
        )));
    }
    let last_is_user = request
        .messages
        .last()
        .is_some_and(|turn| turn.role == ChatRole::User);
    if !last_is_user {
        return Err(AppError::BadRequest(
            "the last message must be from the user".into(),
        ));
    }
    if request.messages.iter().any(|turn| turn.content.trim().is_empty()) {
        return Err(AppError::BadRequest("messages must not be blank".into()));
    }

    let reply = chat.reply(request.messages).await?;
    Ok(Json(json!({ "success": true, "reply": reply })))
}
