//! Service configuration parsed from environment variables.
//!
//! LLM settings live in [`crate::llm::config`]; this module covers the
//! listener, the store, and view-level knobs.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://concierge.db?mode=rwc";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_HOTEL_NAME: &str = "Cincinnati Hotel";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
#[error("invalid value for {key}: '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Hotel name used in the answer system instruction.
    pub hotel_name: String,
    /// Request body limit for document uploads.
    pub max_upload_bytes: usize,
    /// Output token cap for chat answers. Unset leaves the model's own
    /// limit, which also covers thinking tokens.
    pub ai_max_tokens: Option<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            hotel_name: DEFAULT_HOTEL_NAME.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ai_max_tokens: None,
        }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// - `PORT` (3000), `DATABASE_URL`, `DB_MAX_CONNECTIONS` (5)
    /// - `HOTEL_NAME` (`Cincinnati Hotel`)
    /// - `MAX_UPLOAD_BYTES` (20 MiB), `AI_MAX_TOKENS` (unset)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] naming the first variable that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse(&lookup, "PORT", defaults.port)?,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            hotel_name: lookup("HOTEL_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.hotel_name),
            max_upload_bytes: parse(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            ai_max_tokens: match lookup("AI_MAX_TOKENS") {
                None => defaults.ai_max_tokens,
                Some(_) => Some(parse(&lookup, "AI_MAX_TOKENS", 0)?),
            },
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError { key, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
