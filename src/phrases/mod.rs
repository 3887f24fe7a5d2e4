// Phrase clustering — canonical theme groups from extracted keywords.
//
// Takes every keyword row both extractors produced, keeps the most
// frequent distinct phrases, embeds them, and merges near-duplicates
// ("the border" / "border wall" / "border") into clusters with a short
// canonical representative.

pub mod agglomerative;
pub mod embedding;

use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use tracing::info;

use crate::keywords::tokenizer::TermTokenizer;
use crate::records::{KeywordRecord, PhraseCluster};

/// Merge cutoff for average-linkage cosine clustering. Granularity is
/// governed by this distance, not by any target cluster count.
pub const MERGE_DISTANCE_THRESHOLD: f64 = 0.4;

/// The most frequent distinct phrases, lowercased and trimmed.
///
/// Every keyword row counts as one occurrence. Ties in frequency break
/// by first encounter order in the combined table, which is itself
/// deterministically sorted.
pub fn select_top_phrases(records: &[KeywordRecord], max_phrases: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for record in records {
        let phrase = record.keyword.trim().to_lowercase();
        if phrase.is_empty() {
            continue;
        }
        match index.get(&phrase) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(phrase.clone(), counts.len());
                counts.push((phrase, 1));
            }
        }
    }

    // Stable sort keeps encounter order among equal counts.
    counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
    counts
        .into_iter()
        .take(max_phrases)
        .map(|(phrase, _)| phrase)
        .collect()
}

/// Group the top phrases into canonical clusters.
///
/// Zero phrases produce an empty set and one phrase produces a single
/// singleton cluster, both without fitting anything. Cluster ids are
/// assigned by the encounter order of each cluster's earliest member
/// and carry no cross-run meaning.
pub fn cluster_phrases(
    records: &[KeywordRecord],
    max_phrases: usize,
    seed: u64,
) -> Result<BTreeMap<usize, PhraseCluster>> {
    let phrases = select_top_phrases(records, max_phrases);

    if phrases.is_empty() {
        info!("No phrases available for clustering");
        return Ok(BTreeMap::new());
    }
    if phrases.len() == 1 {
        let mut clusters = BTreeMap::new();
        clusters.insert(
            0,
            PhraseCluster {
                canonical_phrase: phrases[0].clone(),
                members: phrases,
            },
        );
        return Ok(clusters);
    }

    let tokenizer = TermTokenizer::english();
    let vectors = embedding::embed_phrases(&phrases, &tokenizer, seed)?;

    let n = vectors.len();
    let mut distances = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = embedding::cosine_distance(&vectors[i], &vectors[j]);
            distances[i][j] = d;
            distances[j][i] = d;
        }
    }

    let groups = agglomerative::average_linkage_clusters(&distances, MERGE_DISTANCE_THRESHOLD);

    let mut clusters = BTreeMap::new();
    for (cluster_id, group) in groups.into_iter().enumerate() {
        let members: Vec<String> = group.iter().map(|&i| phrases[i].clone()).collect();
        let canonical = members
            .iter()
            .min_by_key(|m| m.chars().count())
            .cloned()
            .unwrap_or_default();
        clusters.insert(
            cluster_id,
            PhraseCluster {
                canonical_phrase: canonical,
                members,
            },
        );
    }

    info!(
        clusters = clusters.len(),
        phrases = n,
        "Clustered keyphrases"
    );
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Method;

    fn record(doc: &str, keyword: &str) -> KeywordRecord {
        KeywordRecord {
            document_id: doc.to_string(),
            keyword: keyword.to_string(),
            method: Method::Yake,
            score: 0.1,
            rank: 1,
        }
    }

    #[test]
    fn test_select_top_phrases_by_frequency() {
        let records = vec![
            record("d1", "Border Wall"),
            record("d2", "border wall"),
            record("d3", " border wall "),
            record("d1", "energy"),
            record("d2", "energy"),
            record("d1", "court"),
        ];
        let phrases = select_top_phrases(&records, 2);
        assert_eq!(phrases, vec!["border wall", "energy"]);
    }

    #[test]
    fn test_select_ties_keep_encounter_order() {
        let records = vec![
            record("d1", "zeta"),
            record("d1", "alpha"),
            record("d1", "mid"),
        ];
        let phrases = select_top_phrases(&records, 3);
        // All counts equal: encounter order wins, not alphabetical.
        assert_eq!(phrases, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_select_skips_empty_phrases() {
        let records = vec![record("d1", "   "), record("d1", "real phrase")];
        assert_eq!(select_top_phrases(&records, 10), vec!["real phrase"]);
    }

    #[test]
    fn test_no_phrases_empty_clusters() {
        let clusters = cluster_phrases(&[], 500, 42).unwrap();
        assert!(clusters.is_empty());
    }

    #[test]
    fn test_single_phrase_singleton_cluster() {
        let records = vec![record("d1", "border wall")];
        let clusters = cluster_phrases(&records, 500, 42).unwrap();
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[&0];
        assert_eq!(cluster.canonical_phrase, "border wall");
        assert_eq!(cluster.members, vec!["border wall"]);
    }

    #[test]
    fn test_canonical_is_shortest_member() {
        let records = vec![
            record("d1", "border wall construction"),
            record("d2", "border wall"),
            record("d3", "border wall construction"),
            record("d4", "quarterly rainfall totals"),
        ];
        let clusters = cluster_phrases(&records, 500, 42).unwrap();
        let with_wall: Vec<&PhraseCluster> = clusters
            .values()
            .filter(|c| c.members.iter().any(|m| m.contains("border wall")))
            .collect();
        for cluster in with_wall {
            // Whatever the grouping, the representative is never longer
            // than any member.
            let canonical_len = cluster.canonical_phrase.chars().count();
            for member in &cluster.members {
                assert!(canonical_len <= member.chars().count());
            }
        }
    }

    #[test]
    fn test_cluster_ids_are_contiguous_from_zero() {
        let records = vec![
            record("d1", "border wall"),
            record("d2", "energy prices"),
            record("d3", "court ruling"),
        ];
        let clusters = cluster_phrases(&records, 500, 42).unwrap();
        let ids: Vec<usize> = clusters.keys().copied().collect();
        assert_eq!(ids, (0..clusters.len()).collect::<Vec<_>>());
    }
}
