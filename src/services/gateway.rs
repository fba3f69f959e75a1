//! AI gateway — the three calls the views make to the generative-AI service.
//!
//! DESIGN
//! ======
//! Each operation is stateless and makes exactly one request; retries are
//! left to the caller. `extract_text` and `answer` surface failures as
//! [`GatewayError`] with a fixed user-facing message. `classify` never fails:
//! anything that is not one of the eight category names, including a failed
//! call, becomes `General Inquiry`.
//!
//! The answer contract relies on the model replying with [`FALLBACK_ANSWER`]
//! verbatim when the document lacks the answer; [`is_fallback`] is the only
//! place that comparison is made.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::ErrorCode;
use crate::llm::LlmGenerate;
use crate::llm::types::{GenerateRequest, LlmError, Part};
use crate::model::Category;

/// Exact reply the model must give when the document has no answer.
pub const FALLBACK_ANSWER: &str = "I'm sorry, I don't have that information right now.";

/// The only media type accepted for uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const EXTRACTION_INSTRUCTION: &str = "Extract all text from this PDF document.";

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Failed to extract text from PDF via Gemini API.")]
    Extraction(#[source] LlmError),
    #[error("Failed to get a response from the AI.")]
    Generation(#[source] LlmError),
}

impl GatewayError {
    #[must_use]
    pub fn cause(&self) -> &LlmError {
        match self {
            Self::Extraction(e) | Self::Generation(e) => e,
        }
    }
}

impl ErrorCode for GatewayError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Extraction(_) => "E_EXTRACTION",
            Self::Generation(_) => "E_GENERATION",
        }
    }

    fn retryable(&self) -> bool {
        self.cause().retryable()
    }
}

// =============================================================================
// PROMPTS
// =============================================================================

fn answer_system_instruction(hotel_name: &str) -> String {
    format!(
        "You are a helpful assistant for the \"{hotel_name}\".\n\
         Your knowledge is strictly limited to the information contained within the document provided by the user.\n\
         You must not answer any questions using information outside of this document's content. Never make up information.\n\
         If a user's question cannot be answered using ONLY the provided document, you MUST respond with the exact phrase: \"{FALLBACK_ANSWER}\"\n\
         Do not add any other words, apologies, or offers for help to that specific phrase."
    )
}

fn answer_prompt(document: &str, question: &str) -> String {
    format!(
        "--- DOCUMENT START ---\n{document}\n--- DOCUMENT END ---\n\n\
         Based ONLY on the document above, answer the following question: \"{question}\""
    )
}

fn classification_prompt(question: &str) -> String {
    let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    format!(
        "Based on the following user question for a hotel, what is the single most relevant topic?\n\
         Choose only from this list: {}.\n\
         Respond with only the single category name and nothing else.\n\n\
         Question: \"{question}\"",
        names.join(", ")
    )
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Ask the model to transcribe a PDF.
///
/// # Errors
///
/// Returns [`GatewayError::Extraction`] for any failure, including a missing
/// LLM configuration.
pub async fn extract_text(llm: Option<&dyn LlmGenerate>, pdf: &[u8]) -> Result<String, GatewayError> {
    let llm = llm.ok_or(GatewayError::Extraction(LlmError::NotConfigured))?;
    let request = GenerateRequest {
        system: None,
        parts: vec![
            Part::text(EXTRACTION_INSTRUCTION),
            Part::InlineData { mime_type: PDF_MEDIA_TYPE.to_string(), data: STANDARD.encode(pdf) },
        ],
        max_output_tokens: None,
    };

    match llm.generate(&request).await {
        Ok(resp) => {
            info!(pdf_bytes = pdf.len(), text_len = resp.text.len(), model = %resp.model, "gateway: text extracted");
            Ok(resp.text)
        }
        Err(e) => {
            warn!(pdf_bytes = pdf.len(), error = %e, "gateway: extraction failed");
            Err(GatewayError::Extraction(e))
        }
    }
}

/// Answer `question` using only `document`.
///
/// # Errors
///
/// Returns [`GatewayError::Generation`] for any failure, including a missing
/// LLM configuration.
pub async fn answer(
    llm: Option<&dyn LlmGenerate>,
    config: &AppConfig,
    document: &str,
    question: &str,
) -> Result<String, GatewayError> {
    let llm = llm.ok_or(GatewayError::Generation(LlmError::NotConfigured))?;
    let mut request = GenerateRequest::prompt(answer_prompt(document, question))
        .with_system(answer_system_instruction(&config.hotel_name));
    if let Some(max) = config.ai_max_tokens {
        request = request.with_max_output_tokens(max);
    }

    match llm.generate(&request).await {
        Ok(resp) => {
            info!(
                question_len = question.len(),
                answer_len = resp.text.len(),
                input_tokens = resp.input_tokens,
                output_tokens = resp.output_tokens,
                "gateway: answer generated"
            );
            Ok(resp.text)
        }
        Err(e) => {
            warn!(question_len = question.len(), error = %e, "gateway: answer failed");
            Err(GatewayError::Generation(e))
        }
    }
}

/// Bucket `question` into one of the fixed categories. Never fails.
pub async fn classify(llm: Option<&dyn LlmGenerate>, question: &str) -> Category {
    let Some(llm) = llm else {
        return Category::GeneralInquiry;
    };
    match llm.generate(&GenerateRequest::prompt(classification_prompt(question))).await {
        Ok(resp) => Category::normalize(&resp.text),
        Err(e) => {
            warn!(error = %e, "gateway: classification failed, using default category");
            Category::GeneralInquiry
        }
    }
}

/// `true` when `answer` is the not-in-document reply. Surrounding whitespace
/// is ignored; any other difference is not.
#[must_use]
pub fn is_fallback(answer: &str) -> bool {
    answer.trim() == FALLBACK_ANSWER
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
