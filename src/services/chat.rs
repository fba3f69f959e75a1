//! User view — the document-grounded chat.
//!
//! DESIGN
//! ======
//! A turn runs `Idle → AwaitingAnswer → Idle`. Once accepted, the turn runs
//! on its own task, so a caller that goes away does not cancel it: the reply
//! is still written and the phase still returns to `Idle`. Inside the turn
//! the user message is appended and classification is spawned as a second
//! task while the answer is awaited. The two complete in any order and meet only in the store,
//! where each does an atomic update of a different key. A failed answer
//! becomes a `system` message in the transcript; a failed classification is
//! counted as `General Inquiry`.
//!
//! The contact overlay is shown only when the answer is the fallback
//! sentinel, and is hidden again by the next send or by submitting the form.

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::gateway;
use crate::error::ErrorCode;
use crate::model::{Message, QuestionStats};
use crate::state::{AppState, TurnPhase};
use crate::store::{self, StoreError};

pub const ANSWER_ERROR: &str = "Sorry, I encountered an error. Please try again.";
pub const DOCUMENT_MISSING_NOTICE: &str =
    "Hotel information not available. Please ask an admin to upload a PDF document.";
pub const READY_BANNER: &str = "Ready to help! I'll answer based on the latest hotel information.";
pub const CONTACT_PROMPT: &str =
    "A customer service representative can get back to you. Please leave your details.";
pub const CONTACT_ACK: &str = "Thank you! A customer service representative will get back to you.";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Please enter a message.")]
    EmptyMessage,
    #[error("Please wait for the current answer.")]
    TurnInProgress,
    #[error("Hotel information not available. Please ask an admin to upload a PDF document.")]
    DocumentMissing,
    #[error("The contact form is not open.")]
    ContactFormHidden,
    #[error("{0}")]
    InvalidContact(&'static str),
    #[error("Sorry, I encountered an error. Please try again.")]
    Interrupted,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::TurnInProgress => "E_TURN_IN_PROGRESS",
            Self::DocumentMissing => "E_DOCUMENT_MISSING",
            Self::ContactFormHidden => "E_CONTACT_FORM_HIDDEN",
            Self::InvalidContact(_) => "E_INVALID_CONTACT",
            Self::Interrupted => "E_TURN_INTERRUPTED",
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::TurnInProgress => true,
            Self::Store(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// The contact overlay as rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ContactOverlay {
    pub prompt: &'static str,
    pub fields: [&'static str; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub messages: Vec<Message>,
    pub phase: TurnPhase,
    pub contact_form: Option<ContactOverlay>,
    pub composer_enabled: bool,
    /// Shown above the transcript when a document is loaded.
    pub banner: Option<&'static str>,
    /// Shown in place of the composer when no document is loaded.
    pub notice: Option<&'static str>,
}

pub async fn render(state: &AppState) -> UserView {
    let messages = state.store.read(store::CHAT_HISTORY, Vec::new()).await;
    let has_document = state.store.read(store::DOCUMENT_TEXT, None).await.is_some();
    let chat = *state.chat.read().await;

    UserView {
        messages,
        phase: chat.phase,
        contact_form: chat.contact_form_visible.then_some(ContactOverlay {
            prompt: CONTACT_PROMPT,
            fields: ["name", "phone", "email"],
        }),
        composer_enabled: has_document && chat.phase == TurnPhase::Idle,
        banner: has_document.then_some(READY_BANNER),
        notice: (!has_document).then_some(DOCUMENT_MISSING_NOTICE),
    }
}

/// Enter the user view. Starts a new session when the transcript is empty.
/// A turn still in flight keeps its phase.
pub async fn mount(state: &AppState) -> UserView {
    state.chat.write().await.contact_form_visible = false;

    let history = state.store.read(store::CHAT_HISTORY, Vec::new()).await;
    if history.is_empty() {
        match state.store.update(store::CHAT_SESSIONS, 0, |n| *n += 1).await {
            Ok(sessions) => info!(sessions, "chat: session started"),
            Err(e) => warn!(error = %e, "chat: failed to count session"),
        }
    }
    render(state).await
}

// =============================================================================
// TURN
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// The `assistant` answer, or the `system` error notice.
    pub reply: Message,
    pub contact_form_visible: bool,
}

/// Run one chat turn.
///
/// Returns the turn's reply together with the handle of the spawned
/// classification task. Dropping the handle detaches the task; it still
/// records its category.
///
/// # Errors
///
/// Rejects blank input, a turn already in flight, and a missing document
/// before anything is written. A failed answer is not an error: it becomes
/// the `system` reply. [`ChatError::Interrupted`] means the turn task itself
/// died.
pub async fn send_message(state: &AppState, text: &str) -> Result<(TurnOutcome, JoinHandle<()>), ChatError> {
    let question = text.trim();
    if question.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    let Some(document) = state.store.read(store::DOCUMENT_TEXT, None).await else {
        return Err(ChatError::DocumentMissing);
    };

    {
        let mut chat = state.chat.write().await;
        if chat.phase == TurnPhase::AwaitingAnswer {
            return Err(ChatError::TurnInProgress);
        }
        chat.phase = TurnPhase::AwaitingAnswer;
        chat.contact_form_visible = false;
    }

    let turn = {
        let state = state.clone();
        let question = question.to_string();
        tokio::spawn(async move {
            let result = run_turn(&state, &document, &question).await;

            let mut chat = state.chat.write().await;
            chat.phase = TurnPhase::Idle;
            if let Ok((outcome, _)) = &result {
                chat.contact_form_visible = outcome.contact_form_visible;
            }
            result
        })
    };

    match turn.await {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "chat: turn task failed");
            state.chat.write().await.phase = TurnPhase::Idle;
            Err(ChatError::Interrupted)
        }
    }
}

async fn run_turn(
    state: &AppState,
    document: &str,
    question: &str,
) -> Result<(TurnOutcome, JoinHandle<()>), ChatError> {
    append(state, Message::user(question)).await?;
    let classification = spawn_classification(state, question);

    let (reply, contact_form_visible) =
        match gateway::answer(state.llm.as_deref(), &state.config, document, question).await {
            Ok(answer) => {
                let fallback = gateway::is_fallback(&answer);
                info!(question_len = question.len(), fallback, "chat: answered");
                (Message::assistant(answer), fallback)
            }
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "chat: answer failed");
                (Message::system(ANSWER_ERROR), false)
            }
        };

    append(state, reply.clone()).await?;
    Ok((TurnOutcome { reply, contact_form_visible }, classification))
}

async fn append(state: &AppState, message: Message) -> Result<(), StoreError> {
    state
        .store
        .update(store::CHAT_HISTORY, Vec::new(), |history| history.push(message))
        .await
        .map(|_| ())
}

fn spawn_classification(state: &AppState, question: &str) -> JoinHandle<()> {
    let llm = state.llm.clone();
    let store = state.store.clone();
    let question = question.to_string();

    tokio::spawn(async move {
        let category = gateway::classify(llm.as_deref(), &question).await;
        let result = store
            .update(store::QUESTION_STATS, QuestionStats::new(), |stats| {
                *stats.entry(category).or_insert(0) += 1;
            })
            .await;
        match result {
            Ok(_) => info!(%category, "chat: question classified"),
            Err(e) => warn!(%category, error = %e, "chat: failed to record category"),
        }
    })
}

// =============================================================================
// CONTACT FORM
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub message: &'static str,
}

fn filled(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.trim().is_empty())
}

/// Acknowledge the contact overlay's form and close it. The details are not
/// stored or forwarded.
///
/// # Errors
///
/// [`ChatError::ContactFormHidden`] when the overlay is not showing,
/// [`ChatError::InvalidContact`] without a name or without any of phone and
/// email.
pub async fn submit_contact(state: &AppState, request: &ContactRequest) -> Result<ContactReceipt, ChatError> {
    let mut chat = state.chat.write().await;
    if !chat.contact_form_visible {
        return Err(ChatError::ContactFormHidden);
    }
    if request.name.trim().is_empty() {
        return Err(ChatError::InvalidContact("Please enter your name."));
    }
    let has_phone = filled(request.phone.as_deref());
    let has_email = filled(request.email.as_deref());
    if !has_phone && !has_email {
        return Err(ChatError::InvalidContact("Please provide a phone number or an email address."));
    }

    chat.contact_form_visible = false;
    info!(has_phone, has_email, "chat: contact request received");
    Ok(ContactReceipt { message: CONTACT_ACK })
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
