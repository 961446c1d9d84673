//! Keyword-table classifiers: topic inference, intent detection and
//! sentiment scoring.
//!
//! All three are driven by static, ordered tables and plain substring or
//! word-presence tests:
//!
//! - **Topics**: the first topic with any keyword occurring in the lowercased
//!   text wins. The table order is part of the observable behaviour.
//! - **Intents**: the first intent with any trigger phrase occurring in the
//!   lowercased text wins; failing that, the first matching topic yields
//!   [`Intent::Topic`]; otherwise [`Intent::GeneralQuery`].
//! - **Sentiment**: counts of positive and negative words among the
//!   normalized tokens. No weighting and no negation handling, so
//!   "not good" scores positive.
//!
//! Every classifier is total and deterministic.

use std::fmt;

use aphator_text::{contains_any, normalize};

/// Subject areas the assistant can steer a conversation toward.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Topic {
    Blockchain,
    CryptoTrading,
    Application,
    Security,
    Nft,
}

impl Topic {
    /// Identifier form, e.g. `crypto_trading`.
    pub fn name(self) -> &'static str {
        match self {
            Topic::Blockchain => "blockchain",
            Topic::CryptoTrading => "crypto_trading",
            Topic::Application => "application",
            Topic::Security => "security",
            Topic::Nft => "nft",
        }
    }

    /// Human form with underscores replaced by spaces, e.g. `crypto trading`.
    pub fn label(self) -> String {
        self.name().replace('_', " ")
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered topic → keyword table.
pub const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Blockchain,
        &[
            "blockchain", "smart contract", "ethereum", "token", "web3", "crypto", "dapp",
            "decentralized",
        ],
    ),
    (
        Topic::CryptoTrading,
        &[
            "trading", "investment", "portfolio", "market", "bot", "price", "coin", "token",
            "exchange",
        ],
    ),
    (
        Topic::Application,
        &[
            "app", "application", "software", "mobile", "web", "development", "platform",
            "website", "interface",
        ],
    ),
    (
        Topic::Security,
        &[
            "security", "protection", "hack", "risk", "breach", "safe", "secure",
            "vulnerability", "audit",
        ],
    ),
    (
        Topic::Nft,
        &["nft", "collectible", "token", "art", "marketplace", "mint", "royalty", "collection"],
    ),
];

/// First topic whose keywords occur in `text` (case-insensitive).
pub fn infer_topic(text: &str) -> Option<Topic> {
    let lower = text.to_lowercase();
    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(topic, _)| *topic)
}

pub const GREETING_TRIGGERS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
];

pub const FAREWELL_TRIGGERS: &[&str] = &[
    "bye",
    "goodbye",
    "see you",
    "talk to you later",
    "thanks",
    "thank you",
];

/// Whether `text` contains any greeting trigger.
pub fn is_greeting(text: &str) -> bool {
    contains_any(&text.to_lowercase(), GREETING_TRIGGERS)
}

/// Whether `text` contains any farewell trigger.
pub fn is_farewell(text: &str) -> bool {
    contains_any(&text.to_lowercase(), FAREWELL_TRIGGERS)
}

/// What the user appears to want from a turn.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Intent {
    Greeting,
    Farewell,
    InfoRequest,
    PriceInquiry,
    DiscountInquiry,
    CapabilityQuestion,
    Comparison,
    Opinion,
    Problem,
    Clarification,
    Topic(Topic),
    GeneralQuery,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Greeting => "greeting",
            Intent::Farewell => "farewell",
            Intent::InfoRequest => "info_request",
            Intent::PriceInquiry => "price_inquiry",
            Intent::DiscountInquiry => "discount_inquiry",
            Intent::CapabilityQuestion => "capability_question",
            Intent::Comparison => "comparison",
            Intent::Opinion => "opinion",
            Intent::Problem => "problem",
            Intent::Clarification => "clarification",
            Intent::Topic(topic) => return write!(f, "topic_{topic}"),
            Intent::GeneralQuery => "general_query",
        };
        f.write_str(name)
    }
}

/// Ordered intent → trigger phrase table. First match wins.
pub const INTENT_TRIGGERS: &[(Intent, &[&str])] = &[
    (Intent::Greeting, GREETING_TRIGGERS),
    (Intent::Farewell, FAREWELL_TRIGGERS),
    (
        Intent::InfoRequest,
        &["what is", "how does", "tell me about", "explain", "information on", "details about"],
    ),
    (
        Intent::PriceInquiry,
        &["how much", "price", "cost", "pricing", "fee", "rates", "charge"],
    ),
    (
        Intent::DiscountInquiry,
        &[
            "discount", "offer", "deal", "promotion", "cheaper", "affordable", "expensive", "package",
            "any offer",
        ],
    ),
    (
        Intent::CapabilityQuestion,
        &["can you", "are you able", "do you offer", "is it possible", "ability to"],
    ),
    (
        Intent::Comparison,
        &["versus", "compared to", "difference between", "better than", "worse than", "vs"],
    ),
    (
        Intent::Opinion,
        &["what do you think", "recommend", "suggest", "advise", "opinion on", "best"],
    ),
    (
        Intent::Problem,
        &["issue", "problem", "trouble", "error", "difficulty", "challenge", "help"],
    ),
    (
        Intent::Clarification,
        &["what do you mean", "confused", "don't understand", "clarify", "elaborate"],
    ),
];

/// Classify the intent of `text`.
pub fn detect_intent(text: &str) -> Intent {
    let lower = text.to_lowercase();

    if let Some((intent, _)) = INTENT_TRIGGERS
        .iter()
        .find(|(_, triggers)| contains_any(&lower, triggers))
    {
        return *intent;
    }

    TOPIC_KEYWORDS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(topic, _)| Intent::Topic(*topic))
        .unwrap_or(Intent::GeneralQuery)
}

/// Overall mood of an utterance.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        })
    }
}

pub const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "best", "love", "like", "helpful",
    "useful",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "terrible", "awful", "worst", "hate", "dislike", "useless", "disappointing",
    "expensive",
];

/// Score `text` by counting positive and negative word tokens.
pub fn analyze_sentiment(text: &str) -> Sentiment {
    let tokens = normalize(text);
    let positive = tokens
        .iter()
        .filter(|t| POSITIVE_WORDS.contains(&t.as_str()))
        .count();
    let negative = tokens
        .iter()
        .filter(|t| NEGATIVE_WORDS.contains(&t.as_str()))
        .count();

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}
