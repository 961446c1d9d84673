//! Text normalization for the Aphator assistant: lowercasing, punctuation
//! stripping, whitespace splitting and stopword filtering.
//!
//! Every function here is total. Empty or punctuation-only input yields an
//! empty token sequence, never an error.
//!
//! "Content tokens" are the assistant's proxy for meaningful keywords: a
//! normalized token longer than three characters that is not a stopword.
//! Both the interest counter and the learned-pattern key are built from them.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Minimum number of characters (exclusive) a content token must exceed.
pub const CONTENT_TOKEN_MIN_LEN: usize = 3;

/// Common English stopwords.
///
/// Contractions are listed in their apostrophe form even though
/// [`normalize`] splits them ("don't" becomes "don", "t"); the split halves
/// are listed separately.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Whether `token` (already lowercase) is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Normalize text into lowercase word tokens.
///
/// 1. Converts to lowercase.
/// 2. Replaces every character that is not alphanumeric, `_` or whitespace
///    with a space.
/// 3. Splits on whitespace.
///
/// # Examples
///
/// ```
/// use aphator_text::normalize;
///
/// assert_eq!(normalize("Don't stop, Web3!"), vec!["don", "t", "stop", "web3"]);
/// ```
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Normalized tokens with stopwords removed.
pub fn without_stopwords(text: &str) -> Vec<String> {
    normalize(text)
        .into_iter()
        .filter(|tok| !is_stopword(tok))
        .collect()
}

/// Key terms of `text`: normalized tokens longer than three characters that
/// are not stopwords, in utterance order (duplicates kept).
pub fn content_tokens(text: &str) -> Vec<String> {
    normalize(text)
        .into_iter()
        .filter(|tok| is_content_token(tok))
        .collect()
}

/// Whether a single normalized token qualifies as a content token.
pub fn is_content_token(token: &str) -> bool {
    token.chars().count() > CONTENT_TOKEN_MIN_LEN && !is_stopword(token)
}

/// Whether any needle occurs as a substring of `haystack`.
///
/// Callers lowercase `haystack` first; needles are expected lowercase.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
