//! Persistent key-value store.
//!
//! DESIGN
//! ======
//! Every piece of view state lives under a named, typed [`StoreKey`] as a JSON
//! document in the `kv_store` table. Reads never fail: an absent row, a row
//! that no longer decodes into the key's type, or a failed query all yield
//! the default the caller passes in.
//!
//! CONSISTENCY
//! ===========
//! Writes are last-write-wins per key. All writes go through one in-process
//! async mutex, so read-modify-write updates from concurrent tasks (the
//! background classifier and the chat turn) never lose increments, and
//! multi-key resets run inside a single transaction.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::{Sqlite, SqlitePool};
use tokio::sync::Mutex;
use tracing::warn;

use crate::model::{Message, QuestionStats, Role};

// =============================================================================
// KEYS
// =============================================================================

/// A named store slot holding values of type `T`.
pub struct StoreKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> StoreKey<T> {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name, _value: PhantomData }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for StoreKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StoreKey<T> {}

/// Current navigation state.
pub const ROLE: StoreKey<Role> = StoreKey::new("app_view");
/// Text extracted from the most recent upload, absent until the first one.
pub const DOCUMENT_TEXT: StoreKey<Option<String>> = StoreKey::new("pdf_text");
/// Ordered chat transcript.
pub const CHAT_HISTORY: StoreKey<Vec<Message>> = StoreKey::new("chat_history");
/// Number of chat sessions started since the last upload.
pub const CHAT_SESSIONS: StoreKey<u64> = StoreKey::new("chat_sessions");
/// Question counts per category since the last upload.
pub const QUESTION_STATS: StoreKey<QuestionStats> = StoreKey::new("question_stats");

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl crate::error::ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "E_STORE_DATABASE",
            Self::Encode(_) => "E_STORE_ENCODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Typed access to the `kv_store` table. Clone is cheap; clones share the
/// pool and the write lock.
#[derive(Clone)]
pub struct KvStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
}

impl KvStore {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, write_lock: Arc::new(Mutex::new(())) }
    }

    /// Read `key`, or `default` when it is absent, undecodable, or unreadable.
    pub async fn read<T: DeserializeOwned>(&self, key: StoreKey<T>, default: T) -> T {
        match fetch_raw(&self.pool, key.name).await {
            Ok(Some(raw)) => decode(key.name, &raw).unwrap_or(default),
            Ok(None) => default,
            Err(e) => {
                warn!(key = key.name, error = %e, "store: read failed, using default");
                default
            }
        }
    }

    /// Replace the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the value cannot be encoded or the write fails.
    pub async fn write<T: Serialize>(&self, key: StoreKey<T>, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value)?;
        let _guard = self.write_lock.lock().await;
        upsert(&self.pool, key.name, &raw).await
    }

    /// Atomically read `key` (or `default`), apply `f`, and write the result
    /// back. Returns the value that was written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the transaction fails. Nothing is written in
    /// that case.
    pub async fn update<T, F>(&self, key: StoreKey<T>, default: T, f: F) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let mut value = match fetch_raw(&mut *tx, key.name).await? {
            Some(raw) => decode(key.name, &raw).unwrap_or(default),
            None => default,
        };
        f(&mut value);

        let raw = serde_json::to_string(&value)?;
        upsert(&mut *tx, key.name, &raw).await?;
        tx.commit().await?;
        Ok(value)
    }

    /// Store new document text and clear the session counter, question
    /// statistics, and transcript in one transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the transaction fails; no key changes then.
    pub async fn reset_document(&self, text: &str) -> Result<(), StoreError> {
        let document = serde_json::to_string(&Some(text))?;
        let sessions = serde_json::to_string(&0_u64)?;
        let stats = serde_json::to_string(&QuestionStats::new())?;
        let history = serde_json::to_string(&Vec::<Message>::new())?;

        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        upsert(&mut *tx, DOCUMENT_TEXT.name, &document).await?;
        upsert(&mut *tx, CHAT_SESSIONS.name, &sessions).await?;
        upsert(&mut *tx, QUESTION_STATS.name, &stats).await?;
        upsert(&mut *tx, CHAT_HISTORY.name, &history).await?;
        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// SQL
// =============================================================================

/// Current time as milliseconds since Unix epoch.
fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Option<T> {
    match serde_json::from_str(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "store: stored value is corrupt, using default");
            None
        }
    }
}

async fn fetch_raw<'e, E>(executor: E, key: &str) -> Result<Option<String>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
        .bind(key)
        .fetch_optional(executor)
        .await
}

async fn upsert<'e, E>(executor: E, key: &str, raw: &str) -> Result<(), StoreError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
          ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(raw)
    .bind(now_ms())
    .execute(executor)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
