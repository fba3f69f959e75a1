//! Admin view — document upload and usage statistics.
//!
//! DESIGN
//! ======
//! An upload is validated locally, then sent to the gateway for text
//! extraction. Only a successful extraction touches the store, and then it
//! replaces the document and clears every per-document counter in one
//! transaction. A failed extraction leaves all persisted state as it was.

use serde::Serialize;
use tracing::info;

use super::gateway::{self, GatewayError, PDF_MEDIA_TYPE};
use crate::error::ErrorCode;
use crate::model::{Category, QuestionStats};
use crate::state::AppState;
use crate::store::{self, StoreError};

pub const UPLOAD_SUCCESS: &str = "PDF processed successfully! The chatbot is now updated.";
pub const NO_DATA_PLACEHOLDER: &str = "No question data yet. Start a chat session to see statistics here.";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("Please select a PDF file first.")]
    MissingFile,
    #[error("Invalid file type. Please upload a PDF.")]
    InvalidFileType,
    #[error("Please upload a single PDF file.")]
    MultipleFiles,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for AdminError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile => "E_MISSING_FILE",
            Self::InvalidFileType => "E_INVALID_FILE_TYPE",
            Self::MultipleFiles => "E_MULTIPLE_FILES",
            Self::Gateway(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::MissingFile | Self::InvalidFileType | Self::MultipleFiles => false,
            Self::Gateway(e) => e.retryable(),
            Self::Store(e) => e.retryable(),
        }
    }
}

// =============================================================================
// UPLOAD
// =============================================================================

/// A file that passed local validation.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadReceipt {
    pub message: &'static str,
    pub document_chars: usize,
}

/// Check the selected file before any network call.
///
/// # Errors
///
/// [`AdminError::MissingFile`] when nothing (or an empty file) was selected,
/// [`AdminError::InvalidFileType`] when the declared media type is not
/// `application/pdf`.
pub fn validate_upload(
    file_name: Option<&str>,
    media_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<PdfUpload, AdminError> {
    if bytes.is_empty() {
        return Err(AdminError::MissingFile);
    }
    if media_type != Some(PDF_MEDIA_TYPE) {
        return Err(AdminError::InvalidFileType);
    }
    Ok(PdfUpload { file_name: file_name.map(str::to_string), bytes })
}

/// Extract the upload's text and make it the current document.
///
/// # Errors
///
/// Returns [`AdminError::Gateway`] when extraction fails and
/// [`AdminError::Store`] when the reset cannot be written; in both cases no
/// persisted key has changed.
pub async fn upload_document(state: &AppState, upload: PdfUpload) -> Result<UploadReceipt, AdminError> {
    let text = gateway::extract_text(state.llm.as_deref(), &upload.bytes).await?;
    state.store.reset_document(&text).await?;

    let document_chars = text.chars().count();
    info!(
        file_name = upload.file_name.as_deref().unwrap_or("-"),
        pdf_bytes = upload.bytes.len(),
        document_chars,
        "admin: document replaced, counters reset"
    );
    Ok(UploadReceipt { message: UPLOAD_SUCCESS, document_chars })
}

// =============================================================================
// STATISTICS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub sessions: u64,
    pub total_questions: u64,
    /// Chart data, `None` until some category has a question.
    pub by_category: Option<Vec<CategoryCount>>,
    pub placeholder: Option<&'static str>,
}

/// Build chart rows: non-zero counts, highest first, ties in category order.
#[must_use]
pub fn chart(stats: &QuestionStats) -> Vec<CategoryCount> {
    let mut rows: Vec<CategoryCount> = stats
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&category, &count)| CategoryCount { category, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.category.cmp(&b.category)));
    rows
}

pub async fn statistics(state: &AppState) -> Statistics {
    let sessions = state.store.read(store::CHAT_SESSIONS, 0).await;
    let stats = state.store.read(store::QUESTION_STATS, QuestionStats::new()).await;

    let rows = chart(&stats);
    let total_questions = rows.iter().map(|r| r.count).sum();
    let (by_category, placeholder) = if rows.is_empty() {
        (None, Some(NO_DATA_PLACEHOLDER))
    } else {
        (Some(rows), None)
    };
    Statistics { sessions, total_questions, by_category, placeholder }
}

// =============================================================================
// RENDER
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminView {
    pub statistics: Statistics,
    pub document_loaded: bool,
    pub document_chars: usize,
}

pub async fn render(state: &AppState) -> AdminView {
    let statistics = statistics(state).await;
    let document = state.store.read(store::DOCUMENT_TEXT, None).await;
    AdminView {
        statistics,
        document_loaded: document.is_some(),
        document_chars: document.as_deref().map_or(0, |d| d.chars().count()),
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
