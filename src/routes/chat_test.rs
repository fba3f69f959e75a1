use super::*;

#[test]
fn chat_error_to_api_maps_each_variant() {
    let cases = [
        (ChatError::EmptyMessage, StatusCode::BAD_REQUEST),
        (ChatError::TurnInProgress, StatusCode::CONFLICT),
        (ChatError::DocumentMissing, StatusCode::CONFLICT),
        (ChatError::ContactFormHidden, StatusCode::CONFLICT),
        (ChatError::InvalidContact("Please enter your name."), StatusCode::UNPROCESSABLE_ENTITY),
        (ChatError::Interrupted, StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (err, status) in cases {
        assert_eq!(chat_error_to_api(&err).status, status, "{err}");
    }
}

#[test]
fn document_missing_carries_notice() {
    let api = chat_error_to_api(&ChatError::DocumentMissing);
    assert_eq!(api.body.code, "E_DOCUMENT_MISSING");
    assert_eq!(
        api.body.error,
        "Hotel information not available. Please ask an admin to upload a PDF document."
    );
}

#[test]
fn send_message_body_requires_content() {
    assert!(serde_json::from_str::<SendMessageBody>("{}").is_err());
    let body: SendMessageBody = serde_json::from_str(r#"{"content":"hi"}"#).unwrap();
    assert_eq!(body.content, "hi");
}
