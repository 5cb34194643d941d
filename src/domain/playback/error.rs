use crate::domain::tts::TtsServiceError;

/// Errors a play call surfaces to the host.
///
/// A generation failure rejects the whole call: once substitution was
/// attempted there is no safe fallback audio, so the host's own error
/// handling takes over. Persistence trouble never appears here, it is
/// swallowed inside the cache layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlaybackServiceError {
    #[error(transparent)]
    Generation(#[from] TtsServiceError),
    #[error("audio element error: {0}")]
    Element(String),
}
