use parking_lot::Mutex;
use std::collections::HashMap;

/// Per-sentence play-attempt counters, for telling late audio from stale
/// audio.
///
/// Every play request takes a fresh index from `begin_attempt`. When the
/// request's audio is finally ready it asks `is_current`; a newer attempt
/// for the same sentence means this one is stale and must stay silent.
/// Counters only grow, so for any one sentence the last request issued
/// decides whether sound comes out, whatever order the generation work
/// completes in.
///
/// Keys are the raw sentence text as the session reports it.
pub struct PlaybackSequencer {
    counts: Mutex<HashMap<String, u64>>,
}

impl PlaybackSequencer {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Record a new play attempt for this sentence and return its index.
    pub fn begin_attempt(&self, sentence: &str) -> u64 {
        let mut counts = self.counts.lock();
        let count = counts.entry(sentence.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Whether `attempt` is still the most recent attempt for this sentence.
    pub fn is_current(&self, sentence: &str, attempt: u64) -> bool {
        self.counts.lock().get(sentence).copied() == Some(attempt)
    }
}

impl Default for PlaybackSequencer {
    fn default() -> Self {
        Self::new()
    }
}
