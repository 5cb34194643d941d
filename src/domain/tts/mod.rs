pub mod audio;
pub mod error;
pub mod language;
pub mod normalizer;
pub mod profile;
pub mod service;

pub use audio::EncodedAudio;
pub use error::TtsServiceError;
pub use language::{InvalidLanguageTag, LanguageTag};
pub use normalizer::{NormalizerFn, SentenceNormalizers};
pub use profile::{LanguageProfiles, VoiceProfile, VoiceTuning};
pub use service::TtsService;
