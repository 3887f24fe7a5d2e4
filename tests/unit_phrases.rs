// Unit tests for phrase selection and threshold-driven clustering.
//
// Cluster granularity comes from the merge-distance threshold, not a
// target cluster count, so these tests pin down the boundary behavior:
// zero phrases, one phrase, near-duplicates, and unrelated phrases.

use prism::phrases::{cluster_phrases, select_top_phrases, MERGE_DISTANCE_THRESHOLD};
use prism::records::{KeywordRecord, Method};

fn record(doc: &str, keyword: &str) -> KeywordRecord {
    KeywordRecord {
        document_id: doc.to_string(),
        keyword: keyword.to_string(),
        method: Method::Yake,
        score: 0.1,
        rank: 1,
    }
}

// ============================================================
// Phrase selection
// ============================================================

#[test]
fn selection_lowercases_trims_and_counts() {
    let records = vec![
        record("d1", "Border Wall"),
        record("d2", "  border wall "),
        record("d3", "border wall"),
        record("d1", "solar energy"),
    ];

    let phrases = select_top_phrases(&records, 10);
    assert_eq!(phrases[0], "border wall");
    assert_eq!(phrases.len(), 2);
}

#[test]
fn selection_ties_keep_encounter_order() {
    let records = vec![
        record("d1", "zeta plan"),
        record("d2", "alpha plan"),
        record("d3", "zeta plan"),
        record("d4", "alpha plan"),
    ];

    let phrases = select_top_phrases(&records, 10);
    assert_eq!(phrases, vec!["zeta plan", "alpha plan"]);
}

#[test]
fn selection_cap_limits_output() {
    let records: Vec<KeywordRecord> = (0..20)
        .map(|i| record("d1", &format!("phrase number {i}")))
        .collect();
    assert_eq!(select_top_phrases(&records, 5).len(), 5);
}

// ============================================================
// Clustering boundaries
// ============================================================

#[test]
fn no_phrases_yield_empty_cluster_set() {
    let clusters = cluster_phrases(&[], 500, 42).unwrap();
    assert!(clusters.is_empty());
}

#[test]
fn single_phrase_yields_one_singleton_cluster() {
    let records = vec![record("d1", "border wall")];
    let clusters = cluster_phrases(&records, 500, 42).unwrap();

    assert_eq!(clusters.len(), 1);
    let cluster = &clusters[&0];
    assert_eq!(cluster.canonical_phrase, "border wall");
    assert_eq!(cluster.members, vec!["border wall".to_string()]);
}

#[test]
fn near_duplicates_cluster_with_shortest_canonical() {
    let records = vec![
        record("d1", "border wall construction"),
        record("d2", "border wall"),
        record("d3", "wall construction"),
        record("d4", "renewable solar energy"),
        record("d5", "solar energy"),
    ];

    let clusters = cluster_phrases(&records, 500, 42).unwrap();

    // The wall phrases and the energy phrases must land in different
    // clusters; within each, the canonical is the shortest member.
    let mut wall_cluster = None;
    let mut energy_cluster = None;
    for cluster in clusters.values() {
        if cluster.members.iter().any(|m| m.contains("wall")) {
            wall_cluster = Some(cluster);
        }
        if cluster.members.iter().any(|m| m.contains("energy")) {
            energy_cluster = Some(cluster);
        }
    }

    let wall = wall_cluster.expect("wall phrases missing");
    let energy = energy_cluster.expect("energy phrases missing");
    assert!(!wall.members.iter().any(|m| m.contains("energy")));
    assert!(!energy.members.iter().any(|m| m.contains("wall")));
    assert_eq!(energy.canonical_phrase, "solar energy");
    assert!(wall
        .members
        .iter()
        .all(|m| m.chars().count() >= wall.canonical_phrase.chars().count()));
}

#[test]
fn cluster_ids_are_contiguous_from_zero() {
    let records = vec![
        record("d1", "border wall"),
        record("d2", "solar energy"),
        record("d3", "tax reform"),
    ];

    let clusters = cluster_phrases(&records, 500, 42).unwrap();
    let ids: Vec<usize> = clusters.keys().copied().collect();
    let expected: Vec<usize> = (0..clusters.len()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn every_selected_phrase_lands_in_exactly_one_cluster() {
    let records = vec![
        record("d1", "border wall"),
        record("d2", "border wall construction"),
        record("d3", "solar energy"),
        record("d4", "wind energy"),
        record("d5", "tax reform"),
    ];

    let clusters = cluster_phrases(&records, 500, 42).unwrap();
    let mut all_members: Vec<String> = clusters
        .values()
        .flat_map(|c| c.members.iter().cloned())
        .collect();
    all_members.sort();

    let mut expected = vec![
        "border wall".to_string(),
        "border wall construction".to_string(),
        "solar energy".to_string(),
        "wind energy".to_string(),
        "tax reform".to_string(),
    ];
    expected.sort();
    assert_eq!(all_members, expected);
}

#[test]
fn threshold_constant_stays_in_cosine_range() {
    assert!(MERGE_DISTANCE_THRESHOLD > 0.0);
    assert!(MERGE_DISTANCE_THRESHOLD < 1.0);
}

#[test]
fn same_seed_reproduces_clusters() {
    let records = vec![
        record("d1", "border wall"),
        record("d2", "border wall construction"),
        record("d3", "solar energy"),
        record("d4", "renewable solar energy"),
        record("d5", "tax reform"),
    ];

    let first = cluster_phrases(&records, 500, 42).unwrap();
    let second = cluster_phrases(&records, 500, 42).unwrap();

    assert_eq!(first.len(), second.len());
    for (id, cluster) in &first {
        let other = &second[id];
        assert_eq!(cluster.canonical_phrase, other.canonical_phrase);
        assert_eq!(cluster.members, other.members);
    }
}
