use super::*;

#[derive(Debug, thiserror::Error)]
#[error("widget jammed")]
struct Jammed;

impl ErrorCode for Jammed {
    fn error_code(&self) -> &'static str {
        "E_JAMMED"
    }

    fn retryable(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
#[error("plain")]
struct Plain;

impl ErrorCode for Plain {
    fn error_code(&self) -> &'static str {
        "E_PLAIN"
    }
}

#[test]
fn retryable_defaults_to_false() {
    assert!(!Plain.retryable());
}

#[test]
fn api_error_copies_code_message_and_flag() {
    let err = ApiError::new(StatusCode::BAD_GATEWAY, &Jammed);
    assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.body.error, "widget jammed");
    assert_eq!(err.body.code, "E_JAMMED");
    assert!(err.body.retryable);
}

#[test]
fn api_error_with_message_is_not_retryable() {
    let err = ApiError::with_message(StatusCode::BAD_REQUEST, "E_BAD", "nope");
    assert_eq!(err.body.error, "nope");
    assert!(!err.body.retryable);
}

#[test]
fn error_body_serializes_all_fields() {
    let body = ErrorBody { error: "x".into(), code: "E_X", retryable: false };
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["error"], "x");
    assert_eq!(json["code"], "E_X");
    assert_eq!(json["retryable"], false);
}

#[test]
fn into_response_keeps_status() {
    let resp = ApiError::with_message(StatusCode::CONFLICT, "E_BUSY", "busy").into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
