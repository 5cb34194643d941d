use super::element::AudioElement;
use super::error::PlaybackServiceError;
use super::sequencer::PlaybackSequencer;
use crate::domain::session::SessionStateExtractor;
use crate::domain::tts::{LanguageProfiles, SentenceNormalizers, TtsService};
use std::sync::Arc;

/// How a play call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The element played its original audio, untouched.
    Native,
    /// Synthetic speech was swapped in and emitted.
    Synthetic,
    /// A newer attempt for the same sentence superseded this one; the
    /// source was swapped but no sound was emitted.
    Suppressed,
}

/// The playback entry point the host routes recognized audio elements
/// through.
///
/// One instance owns all per-session mutable state: the attempt counters
/// and, through the injected [`TtsService`], the in-flight request map.
/// The host constructs it once at startup and calls [`PlaybackService::play`]
/// for every playback invocation it intercepts; dropping the instance ends
/// the session. Tests build a fresh one per case for isolation.
pub struct PlaybackService {
    session: Arc<dyn SessionStateExtractor>,
    tts: Arc<TtsService>,
    profiles: LanguageProfiles,
    normalizers: SentenceNormalizers,
    sequencer: PlaybackSequencer,
}

impl PlaybackService {
    pub fn new(
        session: Arc<dyn SessionStateExtractor>,
        tts: Arc<TtsService>,
        profiles: LanguageProfiles,
    ) -> Self {
        Self {
            session,
            tts,
            profiles,
            normalizers: SentenceNormalizers::with_defaults(),
            sequencer: PlaybackSequencer::new(),
        }
    }

    /// Replace the built-in normalizer registry.
    pub fn with_normalizers(mut self, normalizers: SentenceNormalizers) -> Self {
        self.normalizers = normalizers;
        self
    }

    /// Handle one playback invocation against a recognized audio element.
    ///
    /// When the session exposes a sentence in a language with a voice
    /// profile, synthetic speech is resolved for it and swapped into the
    /// element, preserving the element's volume and playback rate across
    /// the source swap. Sound is emitted only if no newer play request for
    /// the same sentence arrived in the meantime. In every other case the
    /// element plays natively, unmodified.
    ///
    /// # Errors
    /// Fails when speech generation fails (the host handles recovery, e.g.
    /// by prompting a retry) or when the audio element itself errors.
    pub async fn play(
        &self,
        element: &mut dyn AudioElement,
    ) -> Result<PlaybackOutcome, PlaybackServiceError> {
        let (language, sentence) = match (
            self.session.current_language(),
            self.session.current_sentence(),
        ) {
            (Some(language), Some(sentence)) => (language, sentence),
            _ => {
                tracing::trace!("no active session state, playing natively");
                return self.play_native(element).await;
            }
        };

        let profile = match self.profiles.get(&language) {
            Some(profile) => profile,
            None => {
                tracing::trace!(language = %language, "no voice profile for language, playing natively");
                return self.play_native(element).await;
            }
        };

        // Everything below is keyed off this attempt: whoever holds the
        // highest index for the sentence when audio arrives gets to play.
        let attempt = self.sequencer.begin_attempt(&sentence);
        let volume = element.volume();
        let playback_rate = element.playback_rate();

        let normalized = self.normalizers.normalize(&language, &sentence);

        tracing::debug!(
            language = %language,
            attempt = attempt,
            text_length = normalized.len(),
            "resolving synthetic speech"
        );

        let audio = match self.tts.resolve(&normalized, &language, profile).await? {
            Some(audio) => audio,
            None => {
                // No synthetic audio exists for this sentence; the native
                // track plays regardless of staleness.
                tracing::debug!(language = %language, "no synthetic audio, playing natively");
                return self.play_native(element).await;
            }
        };

        element.set_source(&audio.data_url());
        element
            .load()
            .await
            .map_err(PlaybackServiceError::Element)?;
        element.set_volume(volume);
        element.set_playback_rate(playback_rate);

        if !self.sequencer.is_current(&sentence, attempt) {
            tracing::debug!(
                language = %language,
                attempt = attempt,
                "attempt superseded, suppressing playback"
            );
            return Ok(PlaybackOutcome::Suppressed);
        }

        element
            .play()
            .await
            .map_err(PlaybackServiceError::Element)?;

        Ok(PlaybackOutcome::Synthetic)
    }

    async fn play_native(
        &self,
        element: &mut dyn AudioElement,
    ) -> Result<PlaybackOutcome, PlaybackServiceError> {
        element
            .play()
            .await
            .map_err(PlaybackServiceError::Element)?;
        Ok(PlaybackOutcome::Native)
    }
}
