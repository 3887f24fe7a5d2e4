// Artifact persistence — seven files per run, plus terminal display.
//
// Every table is written fresh each run: CSV with headers (headers
// alone when a table is empty) and one pretty-printed JSON file for
// the phrase clusters. Floats go through serde's shortest round-trip
// form, so an unchanged input and seed reproduce byte-identical files.

pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::pipeline::Artifacts;

const DOCUMENT_KEYWORD_HEADERS: &[&str] = &["document_id", "keyword", "method", "score", "rank"];
const KEYWORD_SUMMARY_HEADERS: &[&str] = &[
    "keyword",
    "method",
    "document_frequency",
    "total_mentions",
    "mean_rank",
    "mean_score",
];
const THEME_HEADERS: &[&str] = &["theme_id", "top_keywords", "topic_weight_sum"];
const DOCUMENT_THEME_HEADERS: &[&str] =
    &["document_id", "theme_id", "weight", "weight_norm", "rank"];
const SENTIMENT_HEADERS: &[&str] = &[
    "document_id",
    "sentiment_label",
    "compound",
    "positive",
    "neutral",
    "negative",
];

/// Write all seven artifacts into `output_dir`, creating it if needed.
pub fn write_artifacts(artifacts: &Artifacts, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            output_dir.display()
        )
    })?;

    write_documents(artifacts, &output_dir.join("documents.csv"))?;
    write_table(
        &output_dir.join("document_keywords.csv"),
        DOCUMENT_KEYWORD_HEADERS,
        &artifacts.keywords,
    )?;
    write_table(
        &output_dir.join("corpus_keyword_summary.csv"),
        KEYWORD_SUMMARY_HEADERS,
        &artifacts.keyword_summary,
    )?;
    write_clusters(artifacts, &output_dir.join("keyphrase_clusters.json"))?;
    write_table(&output_dir.join("themes.csv"), THEME_HEADERS, &artifacts.themes)?;
    write_table(
        &output_dir.join("document_themes.csv"),
        DOCUMENT_THEME_HEADERS,
        &artifacts.document_themes,
    )?;
    write_table(
        &output_dir.join("document_sentiment.csv"),
        SENTIMENT_HEADERS,
        &artifacts.sentiment,
    )?;

    Ok(())
}

/// The documents table keeps every original input column, in input
/// order, with `document_id` appended. `clean_text` is working state
/// and is never persisted.
fn write_documents(artifacts: &Artifacts, path: &Path) -> Result<()> {
    let table = &artifacts.documents;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;

    let mut header: Vec<&str> = table.columns.iter().map(String::as_str).collect();
    header.push("document_id");
    writer.write_record(&header)?;

    for document in &table.documents {
        let mut row: Vec<&str> = document.cells.iter().map(String::as_str).collect();
        row.push(&document.document_id);
        writer.write_record(&row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = table.len(), "Wrote artifact");
    Ok(())
}

/// One serde-serialized CSV table. The header row is written explicitly
/// so empty tables still carry their column names.
fn write_table<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = rows.len(), "Wrote artifact");
    Ok(())
}

/// Cluster map as pretty JSON, keys in ascending cluster-id order.
fn write_clusters(artifacts: &Artifacts, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&artifacts.phrase_clusters)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(
        path = %path.display(),
        clusters = artifacts.phrase_clusters.len(),
        "Wrote artifact"
    );
    Ok(())
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
