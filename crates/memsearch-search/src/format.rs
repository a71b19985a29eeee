// SPDX-FileCopyrightText: 2026 Memsearch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of search results and the memory gate policy.

use std::fmt::Write;

use memsearch_core::{MemoryRecord, SearchResult};

/// Render results as a numbered list headed by the query.
///
/// An empty list renders as `No results found for: {query}`.
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for: {query}");
    }

    let mut out = format!("Search results for: {query}\n\n");
    for (i, r) in results.iter().enumerate() {
        let _ = write!(out, "{}. {}\n{}\nSource: {}\n\n", i + 1, r.title, r.snippet, r.url);
    }
    out
}

/// Whether memory is too weak to answer without a web search.
///
/// True when there are no records or the best score is below `threshold`.
/// Records without a score count as 0.
pub fn should_search(records: &[MemoryRecord], threshold: f32) -> bool {
    let best = records
        .iter()
        .map(|r| r.score.unwrap_or(0.0))
        .fold(None::<f32>, |acc, s| Some(acc.map_or(s, |a| a.max(s))));

    match best {
        None => true,
        Some(best) => best < threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str) -> SearchResult {
        SearchResult {
            title: title.into(),
            snippet: format!("about {title}"),
            url: url.into(),
        }
    }

    fn record(score: Option<f32>) -> MemoryRecord {
        MemoryRecord {
            id: "r".into(),
            text: "t".into(),
            metadata: Default::default(),
            score,
        }
    }

    #[test]
    fn formats_numbered_list() {
        let text = format_results(
            "weather Tokyo today",
            &[result("JMA", "https://jma.go.jp"), result("NHK", "https://nhk.or.jp")],
        );
        assert_eq!(
            text,
            "Search results for: weather Tokyo today\n\n\
             1. JMA\nabout JMA\nSource: https://jma.go.jp\n\n\
             2. NHK\nabout NHK\nSource: https://nhk.or.jp\n\n"
        );
    }

    #[test]
    fn empty_results_have_their_own_message() {
        assert_eq!(format_results("nothing", &[]), "No results found for: nothing");
    }

    #[test]
    fn search_when_memory_is_empty() {
        assert!(should_search(&[], 0.5));
    }

    #[test]
    fn search_when_best_score_below_threshold() {
        assert!(should_search(&[record(Some(0.3)), record(Some(0.49))], 0.5));
        assert!(should_search(&[record(None)], 0.5));
    }

    #[test]
    fn skip_search_when_memory_is_strong() {
        assert!(!should_search(&[record(Some(0.2)), record(Some(0.5))], 0.5));
    }

    proptest::proptest! {
        #[test]
        fn property_gate_matches_best_score(
            scores in proptest::collection::vec(0.0f32..1.0, 0..8),
            threshold in 0.0f32..1.0,
        ) {
            let records: Vec<MemoryRecord> = scores
                .iter()
                .map(|s| MemoryRecord {
                    id: String::new(),
                    text: String::new(),
                    metadata: Default::default(),
                    score: Some(*s),
                })
                .collect();
            let strong = scores.iter().any(|s| *s >= threshold);
            proptest::prop_assert_eq!(should_search(&records, threshold), !strong);
        }
    }
}

