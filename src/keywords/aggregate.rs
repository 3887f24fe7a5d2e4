// Keyword table aggregation — one combined table plus corpus statistics.
//
// The combined table is the join surface for every downstream consumer,
// so its ordering is pinned: (document_id, method, rank). The summary
// orders by breadth of use first (document frequency), then volume,
// then how consistently top-ranked the keyword is.

use std::collections::{BTreeMap, HashSet};

use crate::records::{KeywordRecord, KeywordSummary, Method};

/// Concatenate both extractors' rows into one deterministic table.
pub fn combine(tfidf: Vec<KeywordRecord>, yake: Vec<KeywordRecord>) -> Vec<KeywordRecord> {
    let mut combined = tfidf;
    combined.extend(yake);
    combined.sort_by(|a, b| {
        a.document_id
            .cmp(&b.document_id)
            .then_with(|| a.method.cmp(&b.method))
            .then_with(|| a.rank.cmp(&b.rank))
    });
    combined
}

#[derive(Default)]
struct GroupStats {
    documents: HashSet<String>,
    mentions: usize,
    rank_sum: f64,
    score_sum: f64,
}

/// Corpus-wide usage statistics, one row per (keyword, method).
///
/// Sorted descending by document_frequency, then total_mentions, then
/// ascending mean_rank; remaining ties settle on the grouping key so
/// reruns are byte-identical. Empty input yields an empty table.
pub fn summarize(records: &[KeywordRecord]) -> Vec<KeywordSummary> {
    let mut groups: BTreeMap<(String, Method), GroupStats> = BTreeMap::new();
    for record in records {
        let group = groups
            .entry((record.keyword.clone(), record.method))
            .or_default();
        group.documents.insert(record.document_id.clone());
        group.mentions += 1;
        group.rank_sum += record.rank as f64;
        group.score_sum += record.score;
    }

    let mut summary: Vec<KeywordSummary> = groups
        .into_iter()
        .map(|((keyword, method), stats)| KeywordSummary {
            keyword,
            method,
            document_frequency: stats.documents.len(),
            total_mentions: stats.mentions,
            mean_rank: stats.rank_sum / stats.mentions as f64,
            mean_score: stats.score_sum / stats.mentions as f64,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.document_frequency
            .cmp(&a.document_frequency)
            .then_with(|| b.total_mentions.cmp(&a.total_mentions))
            .then_with(|| {
                a.mean_rank
                    .partial_cmp(&b.mean_rank)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.keyword.cmp(&b.keyword))
            .then_with(|| a.method.cmp(&b.method))
    });
    summary
}
