//! Fuzzy match scoring for completion queries.
//! Scores are positive for a match and exactly `0.0` for "no match";
//! zero-scored candidates are never proposed.

/// Score an empty query gets against any candidate. Positive so a blank
/// query lists every candidate with equal weight.
const EMPTY_QUERY_SCORE: f64 = 0.1;

/// Scores `query` against `candidate`.
///
/// Case-insensitive subsequence match: every query character must appear in
/// the candidate in order. Tight runs and prefix matches score higher,
/// gaps and a late first hit score lower.
pub fn match_score(query: &str, candidate: &str) -> f64 {
    if query.is_empty() {
        return EMPTY_QUERY_SCORE;
    }

    let query_chars: Vec<char> = query.chars().map(|c| c.to_ascii_lowercase()).collect();
    let candidate_chars: Vec<char> = candidate.chars().map(|c| c.to_ascii_lowercase()).collect();
    if candidate_chars.is_empty() {
        return 0.0;
    }

    let mut positions = Vec::with_capacity(query_chars.len());
    let mut j = 0usize;
    for &qc in &query_chars {
        while j < candidate_chars.len() && candidate_chars[j] != qc {
            j += 1;
        }
        if j == candidate_chars.len() {
            return 0.0;
        }
        positions.push(j);
        j += 1;
    }

    let first_pos = positions.first().copied().unwrap_or(0);
    let mut gap_sum = 0usize;
    for window in positions.windows(2) {
        gap_sum += window[1] - window[0] - 1;
    }

    let is_prefix = first_pos == 0 && gap_sum == 0;
    let mut score = (1.0 + query_chars.len() as f64)
        / (1.0 + 0.5 * gap_sum as f64 + 0.25 * first_pos as f64);
    if is_prefix {
        score += 1.0;
        if query_chars.len() == candidate_chars.len() {
            // Exact match outranks every prefix extension.
            score += 1.0;
        }
    }
    score
}
