pub mod element;
pub mod error;
pub mod sequencer;
pub mod service;

pub use element::AudioElement;
pub use error::PlaybackServiceError;
pub use sequencer::PlaybackSequencer;
pub use service::{PlaybackOutcome, PlaybackService};
