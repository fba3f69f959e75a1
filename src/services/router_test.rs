use super::*;
use crate::state::test_helpers;

// =============================================================================
// transition
// =============================================================================

#[test]
fn home_selects_admin_or_user() {
    assert_eq!(transition(Role::Home, ViewAction::Select { role: Role::Admin }).unwrap(), Role::Admin);
    assert_eq!(transition(Role::Home, ViewAction::Select { role: Role::User }).unwrap(), Role::User);
}

#[test]
fn back_always_lands_on_home() {
    for from in [Role::Home, Role::Admin, Role::User] {
        assert_eq!(transition(from, ViewAction::Back).unwrap(), Role::Home);
    }
}

#[test]
fn selecting_from_a_role_view_is_rejected() {
    let err = transition(Role::Admin, ViewAction::Select { role: Role::User }).unwrap_err();
    assert!(matches!(err, RouterError::InvalidTransition { from: Role::Admin, to: Role::User }));
    assert_eq!(err.error_code(), "E_INVALID_TRANSITION");
}

#[test]
fn selecting_home_is_rejected() {
    assert!(transition(Role::Home, ViewAction::Select { role: Role::Home }).is_err());
}

#[test]
fn view_action_deserializes_tagged() {
    let select: ViewAction = serde_json::from_str(r#"{"action":"select","role":"user"}"#).unwrap();
    assert_eq!(select, ViewAction::Select { role: Role::User });
    let back: ViewAction = serde_json::from_str(r#"{"action":"back"}"#).unwrap();
    assert_eq!(back, ViewAction::Back);
}

// =============================================================================
// navigate / current
// =============================================================================

#[tokio::test]
async fn first_load_is_home() {
    let state = test_helpers::test_app_state().await;
    assert_eq!(current(&state).await, Role::Home);
}

#[tokio::test]
async fn navigation_is_persisted() {
    let state = test_helpers::test_app_state().await;
    navigate(&state, ViewAction::Select { role: Role::Admin }).await.unwrap();
    assert_eq!(state.store.read(store::ROLE, Role::Home).await, Role::Admin);

    navigate(&state, ViewAction::Back).await.unwrap();
    navigate(&state, ViewAction::Select { role: Role::User }).await.unwrap();
    assert_eq!(current(&state).await, Role::User);
}

#[tokio::test]
async fn rejected_navigation_leaves_role_unchanged() {
    let state = test_helpers::test_app_state().await;
    navigate(&state, ViewAction::Select { role: Role::User }).await.unwrap();
    assert!(navigate(&state, ViewAction::Select { role: Role::Admin }).await.is_err());
    assert_eq!(current(&state).await, Role::User);
}

#[tokio::test]
async fn resumes_in_the_last_view() {
    let state = test_helpers::test_app_state().await;
    navigate(&state, ViewAction::Select { role: Role::Admin }).await.unwrap();

    // A second state over the same store stands in for a restarted process.
    let resumed = AppState::new(state.store.clone(), None, crate::config::AppConfig::default());
    assert_eq!(current(&resumed).await, Role::Admin);
}

// =============================================================================
// render
// =============================================================================

#[tokio::test]
async fn render_follows_current_role() {
    let state = test_helpers::test_app_state().await;
    assert!(matches!(render(&state).await, View::Home(_)));

    navigate(&state, ViewAction::Select { role: Role::Admin }).await.unwrap();
    assert!(matches!(render(&state).await, View::Admin(_)));

    navigate(&state, ViewAction::Back).await.unwrap();
    navigate(&state, ViewAction::Select { role: Role::User }).await.unwrap();
    assert!(matches!(render(&state).await, View::User(_)));
}

#[test]
fn home_view_serializes_with_view_tag() {
    let json = serde_json::to_value(View::Home(render_home())).unwrap();
    assert_eq!(json["view"], "home");
    assert_eq!(json["choices"][0]["role"], "admin");
    assert_eq!(json["choices"][1]["role"], "user");
}
