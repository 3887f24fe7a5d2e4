// Unit tests for text normalization and document identity.
//
// Document ids must be pure functions of (title, date, source) — or of
// row position when all three are empty — so rerunning the pipeline on
// unchanged input always produces the same join keys.

use prism::corpus::loader::RawCorpus;
use prism::corpus::normalizer::{build_document_table, document_id, TextNormalizer};

// ============================================================
// Normalization
// ============================================================

#[test]
fn tags_are_stripped_and_text_lowercased() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.normalize("<p>Breaking NEWS</p> from <b>Washington</b>"),
        "breaking news from washington"
    );
}

#[test]
fn tags_act_as_word_breaks() {
    let normalizer = TextNormalizer::new();
    // "word<br>word" must not fuse into one token.
    assert_eq!(normalizer.normalize("first<br>second"), "first second");
}

#[test]
fn whitespace_runs_collapse_and_edges_trim() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.normalize("  too\t\tmany\n\nspaces  "),
        "too many spaces"
    );
}

#[test]
fn empty_and_tag_only_input_normalizes_to_empty() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize("<div><span></span></div>"), "");
}

// ============================================================
// Document identity
// ============================================================

#[test]
fn identical_metadata_yields_identical_ids() {
    let first = document_id("A Headline", "2024-01-02", "Reuters", 0);
    let second = document_id("A Headline", "2024-01-02", "Reuters", 99);
    assert_eq!(first, second, "row position must not leak into metadata ids");
}

#[test]
fn differing_metadata_yields_differing_ids() {
    let first = document_id("A Headline", "2024-01-02", "Reuters", 0);
    let second = document_id("A Headline", "2024-01-03", "Reuters", 0);
    assert_ne!(first, second);
}

#[test]
fn ids_are_sixteen_hex_characters() {
    let id = document_id("title", "date", "source", 0);
    assert_eq!(id.len(), 16);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn empty_metadata_falls_back_to_row_position() {
    let row_three = document_id("", "", "", 3);
    let row_four = document_id("", "", "", 4);
    assert_ne!(row_three, row_four);
    // Same position always hashes the same.
    assert_eq!(row_three, document_id("", "", "", 3));
}

// ============================================================
// Table construction
// ============================================================

#[test]
fn table_preserves_rows_and_assigns_ids() {
    let corpus = RawCorpus {
        columns: vec![
            "title".to_string(),
            "date".to_string(),
            "Source".to_string(),
            "full_text".to_string(),
        ],
        rows: vec![
            vec![
                "Story one".to_string(),
                "2024-05-01".to_string(),
                "AP".to_string(),
                "<p>First STORY text</p>".to_string(),
            ],
            vec![
                "Story two".to_string(),
                "2024-05-02".to_string(),
                "AP".to_string(),
                "Second   story text".to_string(),
            ],
        ],
    };

    let table = build_document_table(&corpus);
    assert_eq!(table.len(), 2);
    assert_eq!(table.documents[0].clean_text, "first story text");
    assert_eq!(table.documents[1].clean_text, "second story text");
    assert_ne!(
        table.documents[0].document_id,
        table.documents[1].document_id
    );
    // Original cells pass through untouched for the documents artifact.
    assert_eq!(table.documents[0].cells[0], "Story one");
    assert_eq!(table.documents[0].cells[3], "<p>First STORY text</p>");
}

#[test]
fn missing_optional_columns_behave_as_empty() {
    let corpus = RawCorpus {
        columns: vec!["full_text".to_string()],
        rows: vec![
            vec!["only text here".to_string()],
            vec!["another row of text".to_string()],
        ],
    };

    let table = build_document_table(&corpus);
    assert_eq!(table.len(), 2);
    // No metadata at all: ids come from row position and still differ.
    assert_ne!(
        table.documents[0].document_id,
        table.documents[1].document_id
    );
}

#[test]
fn duplicate_metadata_rows_share_an_id() {
    let corpus = RawCorpus {
        columns: vec![
            "title".to_string(),
            "date".to_string(),
            "Source".to_string(),
            "full_text".to_string(),
        ],
        rows: vec![
            vec![
                "Same".to_string(),
                "2024-05-01".to_string(),
                "AP".to_string(),
                "first body".to_string(),
            ],
            vec![
                "Same".to_string(),
                "2024-05-01".to_string(),
                "AP".to_string(),
                "second body".to_string(),
            ],
        ],
    };

    let table = build_document_table(&corpus);
    assert_eq!(
        table.documents[0].document_id,
        table.documents[1].document_id,
        "identity is a pure function of the metadata triple"
    );
}
