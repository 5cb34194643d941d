use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;

/// Base64-encoded MP3 payload, in the exact form it is persisted in the
/// sentence cache and handed to the audio element as a data URL.
///
/// Cloning is cheap; the payload is shared between the in-flight result
/// cache and every caller that receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio(Arc<str>);

impl EncodedAudio {
    /// Encode raw audio bytes as they come back from the TTS provider.
    pub fn encode(bytes: &[u8]) -> Self {
        Self(STANDARD.encode(bytes).into())
    }

    /// Wrap a payload that is already base64, e.g. one read back from the
    /// sentence cache.
    pub fn from_encoded(encoded: impl Into<Arc<str>>) -> Self {
        Self(encoded.into())
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// The source string the audio element plays from.
    pub fn data_url(&self) -> String {
        format!("data:audio/mp3;base64,{}", self.0)
    }
}
