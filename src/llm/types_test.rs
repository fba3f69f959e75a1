use super::*;
use crate::error::ErrorCode;

// =============================================================================
// LlmError::error_code
// =============================================================================

#[test]
fn error_code_per_variant() {
    let cases = [
        (LlmError::NotConfigured, "E_LLM_NOT_CONFIGURED"),
        (LlmError::ConfigParse("bad".into()), "E_CONFIG_PARSE"),
        (LlmError::MissingApiKey { var: "KEY".into() }, "E_MISSING_API_KEY"),
        (LlmError::ApiRequest("timeout".into()), "E_API_REQUEST"),
        (LlmError::ApiResponse { status: 500, body: "oops".into() }, "E_API_RESPONSE"),
        (LlmError::ApiParse("json".into()), "E_API_PARSE"),
        (LlmError::EmptyResponse("SAFETY".into()), "E_EMPTY_RESPONSE"),
        (LlmError::HttpClientBuild("tls".into()), "E_HTTP_CLIENT_BUILD"),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code, "{err}");
    }
}

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_api_response_429_and_5xx() {
    for status in [429, 500, 503] {
        let err = LlmError::ApiResponse { status, body: String::new() };
        assert!(err.retryable(), "status {status}");
    }
}

#[test]
fn not_retryable_client_errors() {
    for status in [400, 401, 403] {
        let err = LlmError::ApiResponse { status, body: String::new() };
        assert!(!err.retryable(), "status {status}");
    }
}

#[test]
fn not_retryable_empty_response() {
    assert!(!LlmError::EmptyResponse("no candidates".into()).retryable());
}

#[test]
fn display_missing_api_key_names_var() {
    let err = LlmError::MissingApiKey { var: "GEMINI_API_KEY".into() };
    assert!(err.to_string().contains("GEMINI_API_KEY"));
}

// =============================================================================
// GenerateRequest builders
// =============================================================================

#[test]
fn prompt_builds_single_text_part() {
    let req = GenerateRequest::prompt("hello");
    assert_eq!(req.parts, vec![Part::Text { text: "hello".into() }]);
    assert!(req.system.is_none());
    assert!(req.max_output_tokens.is_none());
}

#[test]
fn builders_set_system_and_tokens() {
    let req = GenerateRequest::prompt("q")
        .with_system("be brief")
        .with_max_output_tokens(64);
    assert_eq!(req.system.as_deref(), Some("be brief"));
    assert_eq!(req.max_output_tokens, Some(64));
}

#[test]
fn part_serializes_with_type_tag() {
    let part = Part::InlineData { mime_type: "application/pdf".into(), data: "QUJD".into() };
    let json = serde_json::to_value(&part).unwrap();
    assert_eq!(json["type"], "inline_data");
    assert_eq!(json["mime_type"], "application/pdf");
}
