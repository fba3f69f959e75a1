use std::sync::Arc;

use super::*;
use crate::model::Message;
use crate::state::test_helpers::{MockLlm, test_app_state, test_app_state_with_llm};

async fn seed_previous_document(state: &AppState) {
    state.store.write(store::DOCUMENT_TEXT, &Some("old".to_string())).await.unwrap();
    state.store.write(store::CHAT_SESSIONS, &3).await.unwrap();
    let stats = QuestionStats::from([(Category::Rooms, 2), (Category::Price, 1)]);
    state.store.write(store::QUESTION_STATS, &stats).await.unwrap();
    state.store.write(store::CHAT_HISTORY, &vec![Message::user("hi")]).await.unwrap();
}

// =============================================================================
// validate_upload
// =============================================================================

#[test]
fn accepts_pdf() {
    let upload = validate_upload(Some("hotel.pdf"), Some("application/pdf"), b"%PDF".to_vec()).unwrap();
    assert_eq!(upload.file_name.as_deref(), Some("hotel.pdf"));
    assert_eq!(upload.bytes, b"%PDF");
}

#[test]
fn empty_selection_is_missing_file() {
    let err = validate_upload(None, None, Vec::new()).unwrap_err();
    assert!(matches!(err, AdminError::MissingFile));
    assert_eq!(err.to_string(), "Please select a PDF file first.");
}

#[test]
fn other_media_type_is_rejected() {
    let docx = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    for media_type in [Some(docx), Some("text/plain"), None] {
        let err = validate_upload(Some("hotel.docx"), media_type, b"PK".to_vec()).unwrap_err();
        assert!(matches!(err, AdminError::InvalidFileType), "{media_type:?}");
        assert_eq!(err.to_string(), "Invalid file type. Please upload a PDF.");
    }
}

#[tokio::test]
async fn docx_never_reaches_the_gateway() {
    let mock = Arc::new(MockLlm::new().then("should not be used"));
    let state = test_app_state_with_llm(mock.clone()).await;
    seed_previous_document(&state).await;

    let docx = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    assert!(validate_upload(Some("hotel.docx"), Some(docx), b"PK".to_vec()).is_err());

    assert_eq!(mock.request_count(), 0);
    assert_eq!(state.store.read(store::DOCUMENT_TEXT, None).await.as_deref(), Some("old"));
}

// =============================================================================
// upload_document
// =============================================================================

#[tokio::test]
async fn successful_upload_resets_every_counter() {
    let mock = Arc::new(MockLlm::new().then("Checkout is at 11am."));
    let state = test_app_state_with_llm(mock).await;
    seed_previous_document(&state).await;

    let upload = validate_upload(Some("hotel.pdf"), Some("application/pdf"), b"%PDF".to_vec()).unwrap();
    let receipt = upload_document(&state, upload).await.unwrap();
    assert_eq!(receipt.message, "PDF processed successfully! The chatbot is now updated.");
    assert_eq!(receipt.document_chars, "Checkout is at 11am.".len());

    assert_eq!(
        state.store.read(store::DOCUMENT_TEXT, None).await.as_deref(),
        Some("Checkout is at 11am.")
    );
    assert_eq!(state.store.read(store::CHAT_SESSIONS, 99).await, 0);
    assert!(state.store.read(store::QUESTION_STATS, QuestionStats::new()).await.is_empty());
    assert!(state.store.read(store::CHAT_HISTORY, vec![Message::user("x")]).await.is_empty());
}

#[tokio::test]
async fn failed_extraction_changes_nothing() {
    let state = test_app_state_with_llm(Arc::new(MockLlm::new())).await;
    seed_previous_document(&state).await;

    let upload = validate_upload(None, Some("application/pdf"), b"%PDF".to_vec()).unwrap();
    let err = upload_document(&state, upload).await.unwrap_err();
    assert!(matches!(err, AdminError::Gateway(GatewayError::Extraction(_))));
    assert_eq!(err.to_string(), "Failed to extract text from PDF via Gemini API.");

    assert_eq!(state.store.read(store::DOCUMENT_TEXT, None).await.as_deref(), Some("old"));
    assert_eq!(state.store.read(store::CHAT_SESSIONS, 0).await, 3);
    assert_eq!(state.store.read(store::QUESTION_STATS, QuestionStats::new()).await.len(), 2);
    assert_eq!(state.store.read(store::CHAT_HISTORY, Vec::new()).await.len(), 1);
}

#[tokio::test]
async fn upload_without_llm_is_extraction_error() {
    let state = test_app_state().await;
    let upload = validate_upload(None, Some("application/pdf"), b"%PDF".to_vec()).unwrap();
    let err = upload_document(&state, upload).await.unwrap_err();
    assert_eq!(err.error_code(), "E_EXTRACTION");
    assert!(state.store.read(store::DOCUMENT_TEXT, None).await.is_none());
}

// =============================================================================
// statistics
// =============================================================================

#[test]
fn chart_sorts_descending_with_ties_in_category_order() {
    let stats = QuestionStats::from([
        (Category::GeneralInquiry, 2),
        (Category::Price, 5),
        (Category::Rooms, 2),
        (Category::Policy, 0),
    ]);
    let rows = chart(&stats);
    let order: Vec<(Category, u64)> = rows.iter().map(|r| (r.category, r.count)).collect();
    assert_eq!(
        order,
        vec![(Category::Price, 5), (Category::Rooms, 2), (Category::GeneralInquiry, 2)]
    );
}

#[tokio::test]
async fn empty_statistics_show_placeholder() {
    let state = test_app_state().await;
    let stats = statistics(&state).await;
    assert_eq!(stats.sessions, 0);
    assert_eq!(stats.total_questions, 0);
    assert!(stats.by_category.is_none());
    assert_eq!(
        stats.placeholder,
        Some("No question data yet. Start a chat session to see statistics here.")
    );
}

#[tokio::test]
async fn statistics_total_matches_counts() {
    let state = test_app_state().await;
    seed_previous_document(&state).await;
    let stats = statistics(&state).await;
    assert_eq!(stats.sessions, 3);
    assert_eq!(stats.total_questions, 3);
    assert_eq!(stats.by_category.unwrap()[0].category, Category::Rooms);
    assert!(stats.placeholder.is_none());
}

#[tokio::test]
async fn render_reports_document_presence() {
    let state = test_app_state().await;
    let view = render(&state).await;
    assert!(!view.document_loaded);
    assert_eq!(view.document_chars, 0);

    seed_previous_document(&state).await;
    let view = render(&state).await;
    assert!(view.document_loaded);
    assert_eq!(view.document_chars, 3);
}

#[test]
fn category_counts_serialize_by_display_name() {
    let row = CategoryCount { category: Category::GeneralInquiry, count: 1 };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["category"], "General Inquiry");
}
