use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Host-process configuration, loaded from the environment.
///
/// Library consumers that bake their settings in at build time (the usual
/// deployment, with `include_str!` for the profile JSON) do not need this;
/// it exists for hosts that wire the engine up from a `.env` file instead.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// ElevenLabs API credential.
    pub elevenlabs_api_key: String,
    /// Where the sentence cache database lives.
    pub cache_db_path: PathBuf,
    /// Optional byte budget for the cache file.
    pub cache_max_size_bytes: Option<u64>,
    /// How many times a failed generation is retried before the failure is
    /// surfaced. 0 defers every failure straight to the host.
    pub generation_retries: u32,
    /// Optional path to a language-profile JSON file, for hosts that do not
    /// embed their profiles at build time.
    pub language_profiles_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            elevenlabs_api_key: env::var("ELEVENLABS_API_KEY")
                .context("ELEVENLABS_API_KEY is not set")?,
            cache_db_path: env::var("CACHE_DB_PATH")
                .unwrap_or_else(|_| "sentence_cache.db".to_string())
                .into(),
            cache_max_size_bytes: match env::var("CACHE_MAX_SIZE_BYTES") {
                Ok(value) => Some(
                    value
                        .parse()
                        .context("CACHE_MAX_SIZE_BYTES must be a byte count")?,
                ),
                Err(_) => None,
            },
            generation_retries: env::var("GENERATION_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .context("GENERATION_RETRIES must be a number")?,
            language_profiles_path: env::var("LANGUAGE_PROFILES_PATH").ok().map(PathBuf::from),
        };

        Ok(config)
    }
}
