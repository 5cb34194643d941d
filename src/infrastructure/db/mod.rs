use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::path::PathBuf;
use std::time::Duration;

pub type DbPool = Pool<Sqlite>;

/// Default SQLite page size; the byte budget is translated into a page
/// count at this granularity.
const PAGE_SIZE_BYTES: u64 = 4096;

/// How the sentence cache database is opened.
#[derive(Debug, Clone)]
pub struct CacheDbOptions {
    /// Database file location. Missing parent directories are created.
    pub path: PathBuf,
    /// Optional byte budget for the cache file. When set, SQLite refuses
    /// writes past it with a quota-exceeded error, which is what triggers
    /// the repository's eviction pass. When absent the platform's own
    /// storage limits apply.
    pub max_size_bytes: Option<u64>,
}

impl CacheDbOptions {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_size_bytes: None,
        }
    }

    pub fn with_max_size_bytes(mut self, bytes: u64) -> Self {
        self.max_size_bytes = Some(bytes);
        self
    }

    fn max_page_count(&self) -> Option<u64> {
        self.max_size_bytes
            .map(|bytes| (bytes / PAGE_SIZE_BYTES).max(1))
    }
}

/// Opens the sentence cache database, creating the file and the schema if
/// they do not exist yet.
pub async fn create_pool(options: &CacheDbOptions) -> Result<DbPool> {
    if let Some(parent) = options.path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create cache directory {}", parent.display())
            })?;
        }
    }

    let mut connect_options = SqliteConnectOptions::new()
        .filename(&options.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(3));

    // max_page_count is a per-connection pragma; setting it here applies it
    // to every connection the pool opens.
    if let Some(pages) = options.max_page_count() {
        connect_options = connect_options.pragma("max_page_count", pages.to_string());
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(connect_options)
        .await
        .with_context(|| format!("failed to open sentence cache at {}", options.path.display()))?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

/// Creates the sentences table and its eviction index. Safe to call
/// repeatedly; everything uses IF NOT EXISTS.
pub async fn ensure_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sentences (
            sentence_key TEXT NOT NULL,
            language TEXT NOT NULL,
            sentence TEXT NOT NULL,
            audio TEXT,
            created_at TEXT NOT NULL,
            PRIMARY KEY (sentence_key, language)
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create sentences table")?;

    // Eviction deletes oldest-first.
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sentences_created_at ON sentences(created_at)")
        .execute(pool)
        .await
        .context("failed to create created_at index")?;

    Ok(())
}
