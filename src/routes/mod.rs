//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client renders whatever `/api/view` returns and posts user actions
//! back. Admin and chat endpoints act on the view of the same name. Every
//! error leaves as the JSON body defined in [`crate::error`].

pub mod admin;
pub mod chat;
pub mod view;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// All API routes with CORS, request tracing, and the upload body limit.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/api/view", get(view::current).post(view::navigate))
        .route("/api/admin/document", post(admin::upload_document))
        .route("/api/admin/stats", get(admin::stats))
        .route("/api/chat/session", post(chat::start_session))
        .route("/api/chat/messages", get(chat::list_messages).post(chat::send_message))
        .route("/api/chat/contact", post(chat::submit_contact))
        .route("/healthz", get(healthz))
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
