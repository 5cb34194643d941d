//! Synthetic speech substitution for sentence playback in a host
//! language-learning application.
//!
//! The host intercepts play requests for the audio elements it recognizes
//! and routes each one through [`PlaybackService::play`]. The service reads
//! the study session's language and sentence, resolves synthetic speech for
//! it, and swaps the element's source before emitting sound. Resolution
//! goes through three layers:
//!
//! - a persistent sentence cache (SQLite) keyed by (sentence, language),
//!   with batched eviction of the oldest entries when the storage quota is
//!   exceeded;
//! - an in-flight deduplication map that coalesces concurrent generation
//!   requests for the same sentence into a single provider call;
//! - a per-sentence attempt sequencer that keeps stale audio silent once a
//!   newer play request for the same sentence has superseded it.
//!
//! Host-specific concerns stay behind narrow traits: [`SessionStateExtractor`]
//! reads the current language and sentence, [`AudioElement`] wraps the actual
//! playback element, and [`TtsGateway`](infrastructure::repositories::TtsGateway)
//! talks to the speech provider.
//!
//! Wiring it up looks like this:
//!
//! ```rust,no_run
//! use speechswap::infrastructure::db::{create_pool, CacheDbOptions};
//! use speechswap::infrastructure::repositories::{ElevenLabsTtsGateway, SentenceCacheRepository};
//! use speechswap::{LanguageProfiles, PlaybackService, SessionStateExtractor, TtsService};
//! use std::sync::Arc;
//!
//! # async fn wire(
//! #     session: Arc<dyn SessionStateExtractor>,
//! #     api_key: &str,
//! #     profiles_json: &str,
//! # ) -> anyhow::Result<PlaybackService> {
//! let pool = Arc::new(create_pool(&CacheDbOptions::new("sentence_cache.db")).await?);
//! let cache = Arc::new(SentenceCacheRepository::new(pool));
//! let gateway = Arc::new(ElevenLabsTtsGateway::new(api_key));
//! let tts = Arc::new(TtsService::new(cache, gateway, 0));
//! let profiles = LanguageProfiles::from_json(profiles_json)?;
//! let service = PlaybackService::new(session, tts, profiles);
//! # Ok(service)
//! # }
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::playback::{
    AudioElement, PlaybackOutcome, PlaybackSequencer, PlaybackService, PlaybackServiceError,
};
pub use domain::session::SessionStateExtractor;
pub use domain::tts::{
    EncodedAudio, LanguageProfiles, LanguageTag, SentenceNormalizers, TtsService, TtsServiceError,
    VoiceProfile, VoiceTuning,
};
