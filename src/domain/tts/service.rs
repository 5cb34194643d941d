use super::audio::EncodedAudio;
use super::error::TtsServiceError;
use super::language::LanguageTag;
use super::profile::VoiceProfile;
use crate::infrastructure::repositories::{SentenceCacheRepository, StoreOutcome, TtsGateway};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Resolves a sentence to its synthetic speech, if any.
///
/// Resolution order: persistent sentence cache, then the TTS gateway, with
/// the fresh result written back to the cache. Concurrent calls for the
/// same sentence coalesce onto a single resolution; everyone gets the same
/// value, or the same failure. Failures are never remembered, so the next
/// attempt starts over. Successes stay memoized in memory for a while, the
/// persistent cache covers everything beyond that.
pub struct TtsService {
    cache: Arc<SentenceCacheRepository>,
    gateway: Arc<dyn TtsGateway>,
    in_flight: Cache<String, Option<EncodedAudio>>,
    generation_retries: u32,
}

impl TtsService {
    pub fn new(
        cache: Arc<SentenceCacheRepository>,
        gateway: Arc<dyn TtsGateway>,
        generation_retries: u32,
    ) -> Self {
        let in_flight = Cache::builder()
            .max_capacity(100)
            .time_to_idle(Duration::from_secs(30 * 60)) // 30 minutes, refreshes on access
            .build();

        Self {
            cache,
            gateway,
            in_flight,
            generation_retries,
        }
    }

    /// Resolve speech for an already-normalized sentence.
    ///
    /// `Ok(None)` means the provider produced no audio for this sentence;
    /// that outcome is cached too, so replays go straight to native audio.
    pub async fn resolve(
        &self,
        sentence: &str,
        language: &LanguageTag,
        profile: &VoiceProfile,
    ) -> Result<Option<EncodedAudio>, TtsServiceError> {
        self.in_flight
            .try_get_with(
                sentence.to_string(),
                self.fetch_or_generate(sentence, language, profile),
            )
            .await
            .map_err(|e| (*e).clone())
    }

    async fn fetch_or_generate(
        &self,
        sentence: &str,
        language: &LanguageTag,
        profile: &VoiceProfile,
    ) -> Result<Option<EncodedAudio>, TtsServiceError> {
        if let Some(entry) = self.cache.lookup(sentence, language).await {
            tracing::debug!(language = %language, "sentence cache hit");
            return Ok(entry.audio.map(EncodedAudio::from_encoded));
        }

        let audio = self
            .generate(sentence, profile)
            .await?
            .map(|bytes| EncodedAudio::encode(&bytes));

        let outcome = self
            .cache
            .store(sentence, language, audio.as_ref().map(|a| a.as_base64()))
            .await;

        match outcome {
            StoreOutcome::Persisted => {
                tracing::debug!(language = %language, "sentence cached");
            }
            StoreOutcome::PersistedAfterEviction { evicted } => {
                tracing::info!(
                    language = %language,
                    evicted = evicted,
                    "sentence cached after evicting oldest entries"
                );
            }
            StoreOutcome::Discarded => {
                tracing::warn!(language = %language, "sentence cache write discarded");
            }
        }

        Ok(audio)
    }

    async fn generate(
        &self,
        sentence: &str,
        profile: &VoiceProfile,
    ) -> Result<Option<Vec<u8>>, TtsServiceError> {
        let mut attempts_left = self.generation_retries;
        loop {
            match self.gateway.generate(sentence, profile).await {
                Ok(audio) => return Ok(audio),
                Err(error) if attempts_left > 0 => {
                    attempts_left -= 1;
                    tracing::warn!(
                        error = %error,
                        attempts_left = attempts_left,
                        "speech generation failed, retrying"
                    );
                }
                Err(error) => return Err(TtsServiceError::Generation(error)),
            }
        }
    }
}
