use super::language::LanguageTag;
use std::collections::HashMap;
use std::sync::Arc;

/// A per-language sentence rewrite applied before generation and caching.
/// Must be deterministic and idempotent: the normalized form is the cache
/// key, so re-normalizing a cached sentence has to land on the same key.
pub type NormalizerFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Registry of per-language sentence normalizers.
///
/// Rules are keyed by language tag. Lookup tries the exact tag first
/// (`"vie-vn"`), then the primary subtag (`"vie"`), so a rule registered
/// for a language applies to all its regional variants.
pub struct SentenceNormalizers {
    by_language: HashMap<String, NormalizerFn>,
}

impl SentenceNormalizers {
    pub fn new() -> Self {
        Self {
            by_language: HashMap::new(),
        }
    }

    /// Registry with the built-in rules.
    ///
    /// Vietnamese: the host renders sentence pauses as dash punctuation,
    /// which the TTS provider reads out loud. Every Unicode dash is replaced
    /// with a space and whitespace runs are collapsed.
    pub fn with_defaults() -> Self {
        let mut normalizers = Self::new();
        normalizers.register("vie", vietnamese_rule());
        normalizers
    }

    pub fn register(&mut self, language: &str, normalizer: NormalizerFn) {
        self.by_language
            .insert(language.trim().to_lowercase(), normalizer);
    }

    /// Normalize a sentence for the given language. Sentences are always
    /// trimmed; languages without a registered rule get no further rewrite.
    pub fn normalize(&self, language: &LanguageTag, sentence: &str) -> String {
        let trimmed = sentence.trim();

        let rule = self
            .by_language
            .get(language.as_str())
            .or_else(|| self.by_language.get(language.primary()));

        match rule {
            Some(rule) => rule(trimmed).trim().to_string(),
            None => trimmed.to_string(),
        }
    }
}

impl Default for SentenceNormalizers {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn vietnamese_rule() -> NormalizerFn {
    let dashes = regex::Regex::new(r"\p{Pd}").unwrap();
    let whitespace = regex::Regex::new(r"\s+").unwrap();

    Arc::new(move |sentence| {
        let without_dashes = dashes.replace_all(sentence, " ");
        whitespace.replace_all(&without_dashes, " ").trim().to_string()
    })
}
