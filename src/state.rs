//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the persistent store, the optional LLM client, and the user view's
//! transient turn state. The turn state is not persisted and starts `Idle`
//! with the contact overlay hidden whenever the process starts.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::llm::LlmGenerate;
use crate::store::KvStore;

// =============================================================================
// CHAT VIEW STATE
// =============================================================================

/// Where the user view is within a chat turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    AwaitingAnswer,
}

/// Transient user-view state: the turn phase plus the contact-form overlay,
/// which is toggled independently of the phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChatViewState {
    pub phase: TurnPhase,
    pub contact_form_visible: bool,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub store: KvStore,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmGenerate>>,
    pub config: Arc<AppConfig>,
    pub chat: Arc<RwLock<ChatViewState>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: KvStore, llm: Option<Arc<dyn LlmGenerate>>, config: AppConfig) -> Self {
        Self { store, llm, config: Arc::new(config), chat: Arc::new(RwLock::new(ChatViewState::default())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
