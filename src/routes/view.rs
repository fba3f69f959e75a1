//! Navigation routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::error::ApiError;
use crate::services::router::{self, RouterError, View, ViewAction};
use crate::state::AppState;

pub(crate) fn router_error_to_api(err: &RouterError) -> ApiError {
    let status = match err {
        RouterError::InvalidTransition { .. } => StatusCode::CONFLICT,
        RouterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    ApiError::new(status, err)
}

/// `GET /api/view` — render the current view.
pub async fn current(State(state): State<AppState>) -> Json<View> {
    Json(router::render(&state).await)
}

/// `POST /api/view` — apply a navigation action and render the result.
pub async fn navigate(
    State(state): State<AppState>,
    Json(action): Json<ViewAction>,
) -> Result<Json<View>, ApiError> {
    router::navigate(&state, action)
        .await
        .map_err(|e| router_error_to_api(&e))?;
    Ok(Json(router::render(&state).await))
}
