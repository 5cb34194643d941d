/// Errors surfaced by speech resolution.
///
/// Cache trouble never shows up here: lookup failures are treated as misses
/// and store failures are swallowed after logging. The only thing a caller
/// can see is the provider failing to generate speech.
///
/// `Clone` because one failure is shared with every caller coalesced onto
/// the same in-flight generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TtsServiceError {
    #[error("speech generation failed: {0}")]
    Generation(String),
}
