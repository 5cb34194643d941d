use super::tts_gateway::TtsGateway;
use crate::domain::tts::{VoiceProfile, VoiceTuning};
use async_trait::async_trait;
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// ElevenLabs implementation of the TTS gateway.
///
/// Calls `POST /v1/text-to-speech/{voice}` and hands back the binary MP3
/// body. No request timeout is configured: a hung call keeps that
/// sentence's in-flight slot occupied until the host environment
/// intervenes, matching the dedup layer's contract.
pub struct ElevenLabsTtsGateway {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

/// Wire body for the synthesis endpoint. The profile is serialized
/// camelCase in configuration but the provider expects snake_case here.
#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_id: Option<&'a str>,
    language_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettingsBody>,
}

#[derive(Debug, Serialize)]
struct VoiceSettingsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    stability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    similarity_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_speaker_boost: Option<bool>,
}

impl From<&VoiceTuning> for VoiceSettingsBody {
    fn from(tuning: &VoiceTuning) -> Self {
        Self {
            stability: tuning.stability,
            similarity_boost: tuning.similarity_boost,
            style: tuning.style,
            use_speaker_boost: tuning.use_speaker_boost,
        }
    }
}

impl ElevenLabsTtsGateway {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the gateway at a different API host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl TtsGateway for ElevenLabsTtsGateway {
    async fn generate(
        &self,
        sentence: &str,
        profile: &VoiceProfile,
    ) -> Result<Option<Vec<u8>>, String> {
        let start_time = std::time::Instant::now();
        let url = format!("{}/v1/text-to-speech/{}", self.base_url, profile.voice);

        let body = SynthesisRequest {
            text: sentence,
            model_id: profile.model_id.as_deref(),
            language_code: &profile.language_code,
            voice_settings: profile.voice_settings.as_ref().map(VoiceSettingsBody::from),
        };

        tracing::debug!(
            voice = %profile.voice,
            language_code = %profile.language_code,
            text_length = sentence.len(),
            "calling ElevenLabs text-to-speech"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("ElevenLabs request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %error_body,
                voice = %profile.voice,
                "ElevenLabs synthesis failed"
            );
            return Err(format!("ElevenLabs API error ({}): {}", status, error_body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read audio response: {}", e))?;

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "elevenlabs",
            latency_ms = duration.as_millis(),
            characters_count = sentence.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );

        if audio.is_empty() {
            // The provider answered but sent no stream for this sentence.
            return Ok(None);
        }

        Ok(Some(audio.to_vec()))
    }
}
