use serde::{Deserialize, Serialize};

/// Language-region tag identifying a study language, e.g. `"vie-vn"`.
///
/// Tags are stored lowercase so that cache keys and profile lookups are
/// case-insensitive. The part before the first `-` is the primary language
/// subtag (`"vie"`), the rest is the regional variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid language tag: {0:?}")]
pub struct InvalidLanguageTag(pub String);

impl LanguageTag {
    pub fn new(tag: impl AsRef<str>) -> Result<Self, InvalidLanguageTag> {
        let normalized = tag.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(InvalidLanguageTag(tag.as_ref().to_string()));
        }
        Ok(Self(normalized))
    }

    /// Build a tag from the language and locale parts the host exposes
    /// separately, e.g. `("VIE", "VN")` becomes `"vie-vn"`.
    pub fn from_parts(language: &str, locale: &str) -> Result<Self, InvalidLanguageTag> {
        Self::new(format!("{}-{}", language.trim(), locale.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, without any regional variant.
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = InvalidLanguageTag;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
