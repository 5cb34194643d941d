use async_trait::async_trait;

/// The host's audio element, as much of it as playback substitution needs.
///
/// Mirrors the surface of an HTML `<audio>` element: a source that can be
/// swapped for a data URL, volume and playback rate that the caller captures
/// before the swap and restores after `load`, and the native `play` path.
/// `play` is used both for untouched native playback and for emitting
/// swapped-in synthetic speech.
#[async_trait]
pub trait AudioElement: Send {
    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    /// Point the element at a new source, e.g. a base64 data URL.
    fn set_source(&mut self, url: &str);

    /// Reload the element so a swapped source takes effect.
    async fn load(&mut self) -> Result<(), String>;

    /// Emit sound from the current source.
    async fn play(&mut self) -> Result<(), String>;
}
