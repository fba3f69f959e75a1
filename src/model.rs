//! Domain values persisted in the store and rendered by the views.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ROLE
// =============================================================================

/// Which top-level view is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Home,
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// MESSAGE
// =============================================================================

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    /// Error notices injected by the service, never sent to the model.
    System,
}

/// One entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Time-ordered UUIDv7, unique within a transcript.
    pub id: String,
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self { id: Uuid::now_v7().to_string(), role, content: content.into() }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Fixed topic vocabulary used to bucket user questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Rooms,
    Restaurant,
    Amenities,
    Booking,
    Location,
    Price,
    Policy,
    #[serde(rename = "General Inquiry")]
    GeneralInquiry,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Rooms,
        Self::Restaurant,
        Self::Amenities,
        Self::Booking,
        Self::Location,
        Self::Price,
        Self::Policy,
        Self::GeneralInquiry,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Restaurant => "Restaurant",
            Self::Amenities => "Amenities",
            Self::Booking => "Booking",
            Self::Location => "Location",
            Self::Price => "Price",
            Self::Policy => "Policy",
            Self::GeneralInquiry => "General Inquiry",
        }
    }

    /// Map a model reply onto the vocabulary. Surrounding whitespace is
    /// ignored; anything else that is not an exact name is `GeneralInquiry`.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == raw)
            .unwrap_or(Self::GeneralInquiry)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category question counts. Keys are enum values, so an out-of-vocabulary
/// category cannot be recorded.
pub type QuestionStats = BTreeMap<Category, u64>;

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
