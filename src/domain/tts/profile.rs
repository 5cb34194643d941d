use super::language::LanguageTag;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Voice configuration for one study language, in the host settings shape:
///
/// ```json
/// {
///   "voice": "pNInz6obpgDQGcFmaJgB",
///   "modelId": "eleven_multilingual_v2",
///   "languageCode": "vi",
///   "voiceSettings": { "stability": 0.5, "similarityBoost": 0.75 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProfile {
    pub voice: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    pub language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_settings: Option<VoiceTuning>,
}

/// Optional provider tuning knobs. Values are passed through to the
/// provider untouched; only non-negativity is checked at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTuning {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stability: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_boost: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

/// Validated map from language tag to voice profile. Languages without an
/// entry keep their native playback untouched.
#[derive(Debug, Clone, Default)]
pub struct LanguageProfiles {
    profiles: HashMap<LanguageTag, VoiceProfile>,
}

impl LanguageProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a profile map from its JSON form, keyed by
    /// language tag. Hosts typically embed the JSON at build time with
    /// `include_str!` and call this once at startup.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let raw: HashMap<String, VoiceProfile> =
            serde_json::from_str(json).context("language profiles are not valid JSON")?;

        let mut profiles = HashMap::with_capacity(raw.len());
        for (key, profile) in raw {
            let tag = LanguageTag::new(&key)
                .with_context(|| format!("invalid language tag {:?} in profiles", key))?;
            validate(&tag, &profile)?;
            profiles.insert(tag, profile);
        }

        Ok(Self { profiles })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read language profiles from {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, language: LanguageTag, profile: VoiceProfile) {
        self.profiles.insert(language, profile);
    }

    pub fn get(&self, language: &LanguageTag) -> Option<&VoiceProfile> {
        self.profiles.get(language)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn validate(tag: &LanguageTag, profile: &VoiceProfile) -> anyhow::Result<()> {
    if profile.voice.trim().is_empty() {
        anyhow::bail!("profile for {} has an empty voice", tag);
    }
    if profile.language_code.trim().is_empty() {
        anyhow::bail!("profile for {} has an empty languageCode", tag);
    }

    if let Some(tuning) = &profile.voice_settings {
        let knobs = [
            ("stability", tuning.stability),
            ("similarityBoost", tuning.similarity_boost),
            ("style", tuning.style),
        ];
        for (name, value) in knobs {
            if let Some(value) = value {
                if value < 0.0 {
                    anyhow::bail!("profile for {} has negative {}: {}", tag, name, value);
                }
            }
        }
    }

    Ok(())
}
