use crate::domain::tts::LanguageTag;

/// Reads the current study state out of the host application.
///
/// How the host derives these is its own business, typically by inspecting
/// its UI state. `None` from either method means no session is active and
/// playback substitution does not apply; the audio element plays natively.
///
/// Implementations are queried synchronously on every play request, so they
/// should be cheap and must never block.
pub trait SessionStateExtractor: Send + Sync {
    /// The session's target language, if a session is active.
    fn current_language(&self) -> Option<LanguageTag>;

    /// The sentence currently being studied, if one is on screen.
    fn current_sentence(&self) -> Option<String>;
}
