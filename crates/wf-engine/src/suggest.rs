//! "Did you mean ...?" hints for mistyped ids and exit labels.

use strsim::jaro_winkler;

/// Minimum similarity score for a suggestion (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// The candidate most similar to `input`, if any is close enough.
///
/// Comparison is case-insensitive. An exact match is not a suggestion.
pub fn closest<'a>(input: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    let mut best: Option<(&'a str, f64)> = None;
    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();
        if candidate_lower == input_lower {
            return None;
        }
        let score = jaro_winkler(&input_lower, &candidate_lower);
        if score >= SUGGEST_THRESHOLD && best.is_none_or(|(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}
