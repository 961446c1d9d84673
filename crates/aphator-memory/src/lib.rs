//! Per-session conversational memory.
//!
//! - [`ConversationContext`]: a bounded FIFO of exchanges plus a running
//!   [`InterestCounter`] over the user's content tokens.
//! - [`LearnedPatterns`]: a write-once cache from a canonical key-term
//!   signature to the first reply given for it.
//!
//! Neither type is shared between sessions and neither outlives its owner.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use aphator_text::content_tokens;
use chrono::{DateTime, Utc};
use tracing::debug;

/// History length used when none is configured.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// One user turn and the reply that was returned for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub user_input: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

/// Multiset of interest tokens that remembers first-insertion order.
///
/// Counts only ever grow. Among equal counts the token inserted first ranks
/// higher.
#[derive(Debug, Clone, Default)]
pub struct InterestCounter {
    /// token -> (count, first-seen sequence number)
    counts: HashMap<String, (u64, u64)>,
    next_seq: u64,
}

impl InterestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of each token.
    pub fn update<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            let seq = self.next_seq;
            let entry = self.counts.entry(token.into()).or_insert_with(|| (0, seq));
            if entry.0 == 0 {
                self.next_seq += 1;
            }
            entry.0 += 1;
        }
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).map_or(0, |(count, _)| *count)
    }

    /// Highest-count token; ties go to the earliest inserted.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|(_, (ca, sa)), (_, (cb, sb))| ca.cmp(cb).then(sb.cmp(sa)))
            .map(|(token, (count, _))| (token.as_str(), *count))
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Rolling conversation history for one session.
#[derive(Debug, Clone)]
pub struct ConversationContext {
    history: VecDeque<Exchange>,
    max_history: usize,
    interests: InterestCounter,
    started: Instant,
}

impl ConversationContext {
    /// Create an empty context retaining at most `max_history` exchanges.
    pub fn new(max_history: usize) -> Self {
        ConversationContext {
            history: VecDeque::new(),
            max_history,
            interests: InterestCounter::new(),
            started: Instant::now(),
        }
    }

    /// Append an exchange stamped with the current time, evicting the oldest
    /// once the bound is exceeded, and count the input's content tokens.
    pub fn record(&mut self, user_input: &str, bot_response: &str) {
        self.history.push_back(Exchange {
            user_input: user_input.to_string(),
            bot_response: bot_response.to_string(),
            timestamp: Utc::now(),
        });
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
        self.interests.update(content_tokens(user_input));
    }

    /// Most frequent interest token so far.
    pub fn dominant_topic(&self) -> Option<&str> {
        self.interests.most_common().map(|(token, _)| token)
    }

    /// Whether `term` occurs (case-insensitively) in any user input among the
    /// last `within_last` exchanges, or the whole history when `None`.
    pub fn mentioned(&self, term: &str, within_last: Option<usize>) -> bool {
        let needle = term.to_lowercase();
        let skip = within_last.map_or(0, |n| self.history.len().saturating_sub(n));
        self.history
            .iter()
            .skip(skip)
            .any(|ex| ex.user_input.to_lowercase().contains(&needle))
    }

    /// Wall-clock time since the session started.
    pub fn duration(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &Exchange> + '_ {
        self.history.iter()
    }

    pub fn last_exchange(&self) -> Option<&Exchange> {
        self.history.back()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn interests(&self) -> &InterestCounter {
        &self.interests
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

/// Content tokens considered for a learned-pattern key.
pub const PATTERN_KEY_TERMS: usize = 3;
/// Minimum content tokens before an utterance gets a key at all.
pub const PATTERN_MIN_TERMS: usize = 2;

/// Canonical key for `utterance`: its first three content tokens, sorted and
/// space-joined. `None` when fewer than two content tokens exist.
pub fn pattern_key(utterance: &str) -> Option<String> {
    let terms = content_tokens(utterance);
    if terms.len() < PATTERN_MIN_TERMS {
        return None;
    }
    let mut key_terms: Vec<String> = terms.into_iter().take(PATTERN_KEY_TERMS).collect();
    key_terms.sort();
    Some(key_terms.join(" "))
}

/// Write-once cache of replies keyed by [`pattern_key`].
#[derive(Debug, Clone, Default)]
pub struct LearnedPatterns {
    responses: HashMap<String, String>,
}

impl LearnedPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached reply for an utterance with the same key terms, if any.
    pub fn lookup(&self, utterance: &str) -> Option<&str> {
        let key = pattern_key(utterance)?;
        self.responses.get(&key).map(String::as_str)
    }

    /// Remember `response` for the utterance's key unless one is already
    /// stored. Returns whether a new entry was written.
    pub fn record(&mut self, utterance: &str, response: &str) -> bool {
        let Some(key) = pattern_key(utterance) else {
            return false;
        };
        if self.responses.contains_key(&key) {
            return false;
        }
        debug!(pattern = %key, "learned new pattern");
        self.responses.insert(key, response.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}
