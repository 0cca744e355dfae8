//! Threshold and top-k filtering of ranked candidates

use super::SearchResult;

/// Two-stage filter over index candidates: similarity-threshold cutoff, then
/// top-k truncation. Input order (descending similarity, as the index
/// returns it) is preserved; no re-sorting happens here.
pub fn filter_ranked(
    candidates: Vec<SearchResult>,
    similarity_threshold: f32,
    top_k: usize,
) -> Vec<SearchResult> {
    candidates
        .into_iter()
        .filter(|result| result.similarity_score >= similarity_threshold)
        .take(top_k)
        .collect()
}
