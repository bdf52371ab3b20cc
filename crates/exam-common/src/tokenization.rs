use std::collections::BTreeSet;

/// English stop words excluded from similarity comparison.
///
/// Words of three characters or fewer are dropped before this list is consulted,
/// so only longer words need to appear here.
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "also", "been", "before", "being", "below", "between",
    "both", "could", "does", "doing", "during", "each", "from", "further", "have", "having",
    "here", "into", "itself", "just", "more", "most", "must", "only", "other", "over", "same",
    "shall", "should", "some", "such", "than", "that", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "under", "until", "very", "were", "what",
    "when", "where", "which", "while", "will", "with", "would", "your",
];

/// Tokens of this many characters or fewer carry no signal.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Reduce text to its set of significant tokens: lowercase, split on whitespace,
/// drop short tokens and stop words.
///
/// Punctuation is kept as part of the token, so `"inspection."` and
/// `"inspection"` are distinct.
pub fn significant_tokens(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .filter(|token| !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Check if a lowercase word is a stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}
