pub mod elevenlabs_tts_gateway;
pub mod sentence_cache_repository;
pub mod tts_gateway;

pub use elevenlabs_tts_gateway::ElevenLabsTtsGateway;
pub use sentence_cache_repository::{CachedSentence, SentenceCacheRepository, StoreOutcome};
pub use tts_gateway::TtsGateway;
