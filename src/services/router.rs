//! View router — the persisted `home | admin | user` navigation state.
//!
//! DESIGN
//! ======
//! Navigation is a three-state machine driven only by explicit user action:
//! choosing a role on the home view, or going back. The current state lives
//! in the store, so the service resumes in whichever view it was left.
//! [`render`] dispatches to one render function per variant.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{admin, chat};
use crate::error::ErrorCode;
use crate::model::Role;
use crate::state::AppState;
use crate::store::{self, StoreError};

// =============================================================================
// TYPES
// =============================================================================

/// A navigation request from the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ViewAction {
    /// Pick a role on the home view.
    Select { role: Role },
    /// Return to the home view.
    Back,
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("cannot select {to} from the {from} view")]
    InvalidTransition { from: Role, to: Role },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for RouterError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "E_INVALID_TRANSITION",
            Self::Store(e) => e.error_code(),
        }
    }
}

/// The home view: a welcome line and the two roles on offer.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub prompt: &'static str,
    pub choices: [RoleChoice; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleChoice {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
}

/// The rendered current view, tagged by role.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    Home(HomeView),
    Admin(admin::AdminView),
    User(chat::UserView),
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// Pure transition function.
///
/// # Errors
///
/// Returns [`RouterError::InvalidTransition`] when a role is selected from
/// anywhere but the home view, or when `home` itself is selected.
pub fn transition(from: Role, action: ViewAction) -> Result<Role, RouterError> {
    match (from, action) {
        (_, ViewAction::Back) => Ok(Role::Home),
        (Role::Home, ViewAction::Select { role: to @ (Role::Admin | Role::User) }) => Ok(to),
        (from, ViewAction::Select { role: to }) => Err(RouterError::InvalidTransition { from, to }),
    }
}

/// Current role, `home` on first load.
pub async fn current(state: &AppState) -> Role {
    state.store.read(store::ROLE, Role::Home).await
}

/// Apply `action` to the persisted role and return the new one.
///
/// # Errors
///
/// Returns [`RouterError`] for an invalid transition or a failed write.
pub async fn navigate(state: &AppState, action: ViewAction) -> Result<Role, RouterError> {
    let from = current(state).await;
    let to = transition(from, action)?;
    if to != from {
        state.store.write(store::ROLE, &to).await?;
        info!(%from, %to, "router: view changed");
    }
    Ok(to)
}

// =============================================================================
// RENDER
// =============================================================================

/// Render whichever view is current.
pub async fn render(state: &AppState) -> View {
    match current(state).await {
        Role::Home => View::Home(render_home()),
        Role::Admin => View::Admin(admin::render(state).await),
        Role::User => View::User(chat::render(state).await),
    }
}

#[must_use]
pub fn render_home() -> HomeView {
    HomeView {
        title: "Welcome!",
        prompt: "Please select your role to continue.",
        choices: [
            RoleChoice {
                role: Role::Admin,
                label: "Admin",
                description: "Upload hotel information and view statistics.",
            },
            RoleChoice {
                role: Role::User,
                label: "Regular User",
                description: "Chat with our AI assistant to ask questions.",
            },
        ],
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
