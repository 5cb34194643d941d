use crate::domain::tts::LanguageTag;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;

/// Oldest entries removed in one batch when the storage quota is hit.
/// Evicting a batch rather than a single entry keeps sustained quota
/// pressure from failing one store at a time.
const EVICTION_BATCH_SIZE: i64 = 100;

/// SQLITE_FULL, the storage layer's quota-exceeded signal.
const SQLITE_FULL_CODE: &str = "13";

/// One cached sentence, as persisted.
#[derive(Debug, Clone, FromRow)]
pub struct CachedSentence {
    pub sentence: String,
    pub language: String,
    /// Base64 MP3 payload. NULL means the provider produced no audio for
    /// this sentence; the row is kept so replays skip generation and stay
    /// on native playback.
    pub audio: Option<String>,
    /// Insertion time, used only for eviction ordering.
    pub created_at: DateTime<Utc>,
}

/// What became of a store call.
///
/// Never an error: the caller already holds the audio and persistence
/// trouble must not block playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Persisted,
    PersistedAfterEviction { evicted: u64 },
    Discarded,
}

/// Persistent sentence cache over SQLite, keyed by (sentence, language).
///
/// The sentence half of the key is case-insensitive: rows carry a
/// Unicode-lowercased, trimmed `sentence_key` column alongside the text as
/// stored. A write to an existing key replaces the prior entry.
pub struct SentenceCacheRepository {
    pool: Arc<DbPool>,
}

impl SentenceCacheRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Case-insensitive sentence lookup, exact language match.
    ///
    /// Storage errors are reported as a miss; the caller proceeds as if the
    /// entry never existed and regenerates.
    pub async fn lookup(&self, sentence: &str, language: &LanguageTag) -> Option<CachedSentence> {
        let result = sqlx::query_as::<_, CachedSentence>(
            r#"
            SELECT sentence, language, audio, created_at
            FROM sentences
            WHERE sentence_key = ? AND language = ?
            "#,
        )
        .bind(sentence_key(sentence))
        .bind(language.as_str())
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => row,
            Err(error) => {
                tracing::debug!(error = %error, "sentence cache lookup failed, treating as miss");
                None
            }
        }
    }

    /// Insert or replace the entry for (sentence, language).
    ///
    /// On a quota-exceeded failure the oldest entries are evicted in one
    /// batch and the insert retried exactly once; any remaining failure is
    /// swallowed and reported as [`StoreOutcome::Discarded`].
    pub async fn store(
        &self,
        sentence: &str,
        language: &LanguageTag,
        audio: Option<&str>,
    ) -> StoreOutcome {
        let created_at = Utc::now();

        match self.insert(sentence, language, audio, created_at).await {
            Ok(()) => StoreOutcome::Persisted,
            Err(error) if is_quota_exceeded(&error) => {
                tracing::debug!(
                    language = %language,
                    "sentence cache quota exceeded, evicting oldest entries"
                );

                let evicted = match self.evict_oldest(EVICTION_BATCH_SIZE).await {
                    Ok(evicted) => evicted,
                    Err(error) => {
                        tracing::warn!(error = %error, "sentence cache eviction failed");
                        return StoreOutcome::Discarded;
                    }
                };

                match self.insert(sentence, language, audio, created_at).await {
                    Ok(()) => StoreOutcome::PersistedAfterEviction { evicted },
                    Err(error) => {
                        tracing::warn!(
                            error = %error,
                            evicted = evicted,
                            "sentence cache write still failing after eviction"
                        );
                        StoreOutcome::Discarded
                    }
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "sentence cache write failed");
                StoreOutcome::Discarded
            }
        }
    }

    /// Number of cached sentences.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sentences")
            .fetch_one(self.pool.as_ref())
            .await
    }

    async fn insert(
        &self,
        sentence: &str,
        language: &LanguageTag,
        audio: Option<&str>,
        created_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sentences (sentence_key, language, sentence, audio, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (sentence_key, language)
            DO UPDATE SET
                sentence = excluded.sentence,
                audio = excluded.audio,
                created_at = excluded.created_at
            "#,
        )
        .bind(sentence_key(sentence))
        .bind(language.as_str())
        .bind(sentence)
        .bind(audio)
        .bind(created_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn evict_oldest(&self, batch: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM sentences
            WHERE rowid IN (
                SELECT rowid FROM sentences
                ORDER BY created_at ASC, rowid ASC
                LIMIT ?
            )
            "#,
        )
        .bind(batch)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}

/// The comparison key: Unicode-lowercased, trimmed sentence text.
fn sentence_key(sentence: &str) -> String {
    sentence.trim().to_lowercase()
}

fn is_quota_exceeded(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => {
            db_error.code().as_deref() == Some(SQLITE_FULL_CODE)
                || db_error.message().contains("database or disk is full")
        }
        _ => false,
    }
}
