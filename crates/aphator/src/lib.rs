//! Response selection engine for the Aphator Tech customer assistant.
//!
//! This is the facade crate that wires together the lower-level components:
//! - [`aphator_text`]: normalization, stopwords, content tokens
//! - [`tfidf_index`]: TF-IDF similarity over the knowledge corpus
//! - [`company_corpus`]: reference data loading and corpus construction
//! - [`aphator_classify`]: topic, intent and sentiment tables
//! - [`aphator_memory`]: conversation context and learned patterns
//!
//! The [`Engine`] is built once and is read-only afterwards, so it can be
//! shared across threads without locking. All per-conversation state lives in
//! a [`Session`], which the caller owns (directly, or through a
//! [`SessionStore`]) and passes to every turn.
//!
//! # Quick Start
//!
//! ```
//! use aphator::{Engine, EngineConfig, ReferenceData};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let engine = Engine::new(&ReferenceData::default(), EngineConfig::default());
//! let mut session = engine.new_session(SmallRng::seed_from_u64(42));
//! let reply = engine.respond(&mut session, "How much does app development cost?");
//! assert!(reply.contains("$10,000"));
//! ```

use std::sync::Mutex;

use aphator_text::{normalize, without_stopwords};
use company_corpus::{Corpus, CorpusEntry};
use rand::Rng;
use tfidf_index::{SimilarityMatch, TfIdfIndex};
use tracing::{debug, info, warn};

pub mod engagement;
pub mod pipeline;
pub mod replies;
pub mod rules;
pub mod session;

pub use aphator_classify::{Intent, Sentiment, Topic};
pub use aphator_memory::DEFAULT_MAX_HISTORY;
pub use company_corpus::{ReferenceData, load_reference_data};
pub use engagement::EngagementInjector;
pub use session::{Session, SessionConfig, SessionError, SessionStore, SharedSession};

/// Similarity score a corpus match must exceed when none is configured.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.2;

/// Terms shorter than this never enter the similarity index.
const MIN_INDEX_TERM_LEN: usize = 2;

/// Engine tuning, fixed at construction.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Exchanges retained per session.
    pub max_history: usize,
    /// Corpus matches are accepted only above this cosine similarity.
    pub similarity_threshold: f64,
    /// Chance that a reply is left without an engagement prompt.
    pub engagement_skip_probability: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_history: DEFAULT_MAX_HISTORY,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            engagement_skip_probability: engagement::DEFAULT_SKIP_PROBABILITY,
        }
    }
}

/// Which cascade stage produced a reply. Ordered by priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    LearnedPattern,
    Greeting,
    Farewell,
    Capability,
    BuildRequest,
    EntityKeyword,
    Similarity,
    FollowUp,
    IntentAnswer,
    LearningQuestion,
    Fallback,
}

/// A reply and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub stage: Stage,
}

impl Reply {
    fn new(stage: Stage, text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            stage,
        }
    }
}

/// Uniform choice from a non-empty static table.
pub(crate) fn pick<'a, R: Rng>(options: &[&'a str], rng: &mut R) -> &'a str {
    options[rng.random_range(0..options.len())]
}

/// The response selection engine: corpus, similarity index and tuning.
#[derive(Debug)]
pub struct Engine {
    corpus: Corpus,
    index: TfIdfIndex,
    config: EngineConfig,
    engagement: EngagementInjector,
}

impl Engine {
    /// Build the corpus from `data` and fit the similarity index over it.
    pub fn new(data: &ReferenceData, config: EngineConfig) -> Self {
        Self::from_corpus(Corpus::build(data), config)
    }

    /// Build over an explicit corpus.
    pub fn from_corpus(corpus: Corpus, config: EngineConfig) -> Self {
        let documents: Vec<Vec<String>> = corpus.texts().map(index_terms).collect();
        let index = TfIdfIndex::fit(&documents);

        if index.is_empty() {
            warn!("corpus is empty; similarity matching disabled");
        } else {
            info!(
                entries = index.len(),
                vocabulary = index.vocabulary().len(),
                "prepared similarity index"
            );
        }

        Engine {
            corpus,
            index,
            engagement: EngagementInjector::new(config.engagement_skip_probability),
            config,
        }
    }

    /// Start a conversation with its own random source.
    pub fn new_session<R: Rng>(&self, rng: R) -> Session<R> {
        Session::new(self.config.max_history, rng)
    }

    /// Session store whose sessions match this engine's history bound.
    pub fn session_store<R: Rng + rand::SeedableRng>(
        &self,
        mut config: SessionConfig,
    ) -> SessionStore<R> {
        config.max_history = self.config.max_history;
        SessionStore::new(config)
    }

    /// Opening line for a conversation. Not recorded in the session.
    pub fn greet<R: Rng>(&self, session: &mut Session<R>) -> String {
        pick(replies::GREETINGS, &mut session.rng).to_string()
    }

    /// Answer one utterance, updating the session.
    pub fn respond<R: Rng>(&self, session: &mut Session<R>, utterance: &str) -> String {
        self.select(session, utterance).text
    }

    /// [`respond`](Self::respond) on a session shared through a store.
    pub fn respond_shared<R: Rng>(
        &self,
        session: &Mutex<Session<R>>,
        session_id: &str,
        utterance: &str,
    ) -> Result<String, SessionError> {
        let mut guard = session
            .lock()
            .map_err(|_| SessionError::Poisoned(session_id.to_string()))?;
        Ok(self.respond(&mut guard, utterance))
    }

    /// Best corpus row for the utterance, if it clears the threshold.
    pub fn best_match(&self, utterance: &str) -> Option<SimilarityMatch> {
        let best = self
            .index
            .best_above(&query_terms(utterance), self.config.similarity_threshold)?;
        debug!(index = best.index, score = best.score, "accepted corpus match");
        Some(best)
    }

    fn most_similar(&self, utterance: &str) -> Option<&CorpusEntry> {
        self.best_match(utterance)
            .and_then(|m| self.corpus.get(m.index))
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(&ReferenceData::default(), EngineConfig::default())
    }
}

/// Terms a corpus document contributes to the index.
fn index_terms(text: &str) -> Vec<String> {
    normalize(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_INDEX_TERM_LEN)
        .collect()
}

/// Terms a query is matched on: like [`index_terms`], minus stopwords.
fn query_terms(text: &str) -> Vec<String> {
    without_stopwords(text)
        .into_iter()
        .filter(|t| t.chars().count() >= MIN_INDEX_TERM_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn quiet_config() -> EngineConfig {
        EngineConfig {
            engagement_skip_probability: 1.0,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn default_config_values() {
        let config = EngineConfig::default();
        assert_eq!(config.max_history, 10);
        assert_eq!(config.similarity_threshold, 0.2);
        assert_eq!(config.engagement_skip_probability, 0.7);
    }

    #[test]
    fn index_rows_align_with_corpus() {
        let engine = Engine::default();
        assert_eq!(engine.index().len(), engine.corpus().len());
    }

    #[test]
    fn index_terms_drop_single_characters() {
        assert_eq!(index_terms("I want a web3 app"), vec!["want", "web3", "app"]);
    }

    #[test]
    fn query_terms_drop_stopwords() {
        assert_eq!(query_terms("What does the company do"), vec!["company"]);
    }

    #[test]
    fn best_match_finds_hand_authored_entry() {
        let engine = Engine::default();
        let m = engine
            .best_match("what kind of applications can you build")
            .unwrap();
        assert_eq!(
            engine.corpus().get(m.index).unwrap().source_text,
            "What kind of applications can you build"
        );
    }

    #[test]
    fn best_match_rejects_unrelated_text() {
        let engine = Engine::default();
        assert_eq!(engine.best_match("purple elephants dancing"), None);
    }

    #[test]
    fn empty_corpus_skips_similarity() {
        let engine = Engine::from_corpus(Corpus::from_entries(vec![]), quiet_config());
        assert!(engine.index().is_empty());
        assert_eq!(engine.best_match("anything at all"), None);

        let mut session = engine.new_session(SmallRng::seed_from_u64(1));
        let reply = engine.select(&mut session, "purple elephants dancing");
        assert_eq!(reply.stage, Stage::Fallback);
    }

    #[test]
    fn threshold_is_configurable() {
        let corpus = Corpus::from_entries(vec![CorpusEntry {
            source_text: "purple elephants".into(),
            response: "Elephants!".into(),
        }]);
        let strict = Engine::from_corpus(
            corpus.clone(),
            EngineConfig {
                similarity_threshold: 0.9,
                ..quiet_config()
            },
        );
        let loose = Engine::from_corpus(corpus, quiet_config());
        // One of two equally weighted terms: cosine 1/sqrt(2).
        assert_eq!(strict.best_match("purple"), None);
        assert!(loose.best_match("purple").is_some());
    }

    #[test]
    fn new_session_uses_configured_history() {
        let engine = Engine::from_corpus(
            Corpus::default(),
            EngineConfig {
                max_history: 3,
                ..quiet_config()
            },
        );
        let session = engine.new_session(SmallRng::seed_from_u64(1));
        assert_eq!(session.context().max_history(), 3);

        let mut store: SessionStore<SmallRng> = engine.session_store(SessionConfig::default());
        let shared = store.checkout("a");
        assert_eq!(shared.lock().unwrap().context().max_history(), 3);
    }

    #[test]
    fn respond_shared_reports_poisoned_session() {
        let engine = Engine::default();
        let session = Mutex::new(engine.new_session(SmallRng::seed_from_u64(1)));
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = session.lock().unwrap();
            panic!("turn failed");
        }));
        let err = engine.respond_shared(&session, "abc", "hello").unwrap_err();
        assert!(matches!(err, SessionError::Poisoned(ref id) if id == "abc"));
    }

    #[test]
    fn respond_shared_answers() {
        let engine = Engine::default();
        let session = Mutex::new(engine.new_session(SmallRng::seed_from_u64(1)));
        let reply = engine.respond_shared(&session, "abc", "hello").unwrap();
        assert!(replies::GREETINGS.contains(&reply.as_str()));
    }

    #[test]
    fn greet_leaves_history_empty() {
        let engine = Engine::default();
        let mut session = engine.new_session(SmallRng::seed_from_u64(1));
        let greeting = engine.greet(&mut session);
        assert!(replies::GREETINGS.contains(&greeting.as_str()));
        assert!(session.is_fresh());
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
