//! Chat routes for the user view.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::model::Message;
use crate::services::chat::{self, ChatError, ContactReceipt, ContactRequest, TurnOutcome, UserView};
use crate::state::AppState;
use crate::store;

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

pub(crate) fn chat_error_to_api(err: &ChatError) -> ApiError {
    let status = match err {
        ChatError::EmptyMessage => StatusCode::BAD_REQUEST,
        ChatError::InvalidContact(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ChatError::TurnInProgress | ChatError::DocumentMissing | ChatError::ContactFormHidden => {
            StatusCode::CONFLICT
        }
        ChatError::Interrupted | ChatError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError::new(status, err)
}

/// `POST /api/chat/session` — mount the user view.
pub async fn start_session(State(state): State<AppState>) -> Json<UserView> {
    Json(chat::mount(&state).await)
}

/// `GET /api/chat/messages` — the persisted transcript.
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<Message>> {
    Json(state.store.read(store::CHAT_HISTORY, Vec::new()).await)
}

/// `POST /api/chat/messages` — run one chat turn.
///
/// Classification keeps running after the response is sent.
pub async fn send_message(
    State(state): State<AppState>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<TurnOutcome>, ApiError> {
    let (outcome, _classification) = chat::send_message(&state, &body.content)
        .await
        .map_err(|e| chat_error_to_api(&e))?;
    Ok(Json(outcome))
}

/// `POST /api/chat/contact` — submit the contact overlay's form.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactReceipt>, ApiError> {
    chat::submit_contact(&state, &request)
        .await
        .map(Json)
        .map_err(|e| chat_error_to_api(&e))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
