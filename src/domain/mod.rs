pub mod playback;
pub mod session;
pub mod tts;
