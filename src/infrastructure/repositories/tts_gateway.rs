use crate::domain::tts::VoiceProfile;
use async_trait::async_trait;

/// Gateway to the speech synthesis provider.
/// Abstracts the underlying TTS service (ElevenLabs today).
///
/// Implementations are responsible for:
/// - Provider-specific wire formats and authentication
/// - Collecting the provider's streamed audio into a single payload
#[async_trait]
pub trait TtsGateway: Send + Sync {
    /// Generate speech for one sentence.
    ///
    /// Returns raw MP3 bytes, or `None` when the provider answered but
    /// produced no audio stream for this sentence.
    ///
    /// # Arguments
    /// * `sentence` - normalized sentence text, sent verbatim
    /// * `profile` - the language's voice configuration
    ///
    /// # Errors
    /// Returns error if the provider call fails or the response is
    /// malformed
    async fn generate(
        &self,
        sentence: &str,
        profile: &VoiceProfile,
    ) -> Result<Option<Vec<u8>>, String>;
}
