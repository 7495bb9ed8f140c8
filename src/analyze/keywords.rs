//! Keyword coverage: fraction of a vocabulary found in a text, damped by length.
//!
//! - terms match as case-insensitive substrings (both sides are lowercased)
//! - raw = matches / min(10, |vocab|)
//! - damping = min(1, chars / 200), floored at 0.3 once anything matched
//! - score = min(1, raw * damping); empty text or empty vocabulary → 0.0

/// Coverage denominator cap: ten hits saturate any vocabulary.
pub const MAX_COVERAGE_TERMS: usize = 10;
/// Text length (chars) at which damping stops.
pub const DAMPING_LENGTH: f32 = 200.0;
/// Damping floor for short texts that still hit the vocabulary.
pub const MIN_DAMPING: f32 = 0.3;

/// Vocabulary terms present in `text` (in vocabulary order).
pub fn matched_terms<'a>(text: &str, vocab: &'a [String]) -> Vec<&'a str> {
    let lower = text.to_lowercase();
    vocab
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty() && lower.contains(t.to_lowercase().as_str()))
        .collect()
}

/// Coverage score in `[0,1]`.
pub fn keyword_coverage(text: &str, vocab: &[String]) -> f32 {
    coverage_from_hits(text, matched_terms(text, vocab).len(), vocab.len())
}

/// Same formula when the caller already counted the hits.
pub fn coverage_from_hits(text: &str, hits: usize, vocab_len: usize) -> f32 {
    if text.trim().is_empty() || vocab_len == 0 || hits == 0 {
        return 0.0;
    }
    let denom = vocab_len.min(MAX_COVERAGE_TERMS) as f32;
    let raw = hits as f32 / denom;

    let len = text.trim().chars().count() as f32;
    let damping = (len / DAMPING_LENGTH).min(1.0).max(MIN_DAMPING);

    (raw * damping).min(1.0)
}
