// Text normalization and document identity.
//
// Normalization is the one transform every downstream stage sees: strip
// markup, lowercase, collapse whitespace, trim. Document ids hash the
// (title, date, source) metadata so reruns and cross-artifact joins are
// stable; rows with no metadata at all fall back to their position.

use regex_lite::Regex;
use sha2::{Digest, Sha256};
use tracing::warn;

use super::{RawCorpus, DATE_COLUMN, SOURCE_COLUMN, TEXT_COLUMN, TITLE_COLUMN};

/// Hex length of a document id (first 16 chars of a SHA-256 digest).
const DOC_ID_LEN: usize = 16;

/// One normalized document plus its original row.
#[derive(Debug, Clone)]
pub struct Document {
    pub document_id: String,
    pub clean_text: String,
    /// Original cells, parallel to `DocumentTable::columns`.
    pub cells: Vec<String>,
}

/// The normalized corpus: original columns plus per-row derived fields.
#[derive(Debug, Clone)]
pub struct DocumentTable {
    /// Original input columns, in input order.
    pub columns: Vec<String>,
    pub documents: Vec<Document>,
}

impl DocumentTable {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Normalized texts in row order, as owned strings.
    pub fn clean_texts(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.clean_text.clone()).collect()
    }
}

/// Canonicalizes raw text values.
pub struct TextNormalizer {
    tag_re: Regex,
    whitespace_re: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            // Patterns are literals; compilation cannot fail.
            tag_re: Regex::new(r"<[^>]+>").unwrap(),
            whitespace_re: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Strip HTML-like tags, lowercase, collapse whitespace, trim.
    ///
    /// Tags are replaced with a space so adjacent words don't fuse.
    /// Missing input is the caller's empty string; this never fails.
    pub fn normalize(&self, raw: &str) -> String {
        let stripped = self.tag_re.replace_all(raw, " ");
        let lowered = stripped.to_lowercase();
        let collapsed = self.whitespace_re.replace_all(&lowered, " ");
        collapsed.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First 16 hex characters of the SHA-256 digest of a string.
pub fn stable_hash(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    hex::encode(digest)[..DOC_ID_LEN].to_string()
}

/// Derive a document id from metadata, falling back to the row position.
///
/// Identical (title, date, source) triples always produce the same id.
pub fn document_id(title: &str, date: &str, source: &str, row_index: usize) -> String {
    let joined = format!("{title}{date}{source}");
    if joined.is_empty() {
        stable_hash(&row_index.to_string())
    } else {
        stable_hash(&joined)
    }
}

/// Normalize every row of a loaded corpus and assign document ids.
pub fn build_document_table(corpus: &RawCorpus) -> DocumentTable {
    let normalizer = TextNormalizer::new();

    let text_idx = corpus.column_index(TEXT_COLUMN);
    let title_idx = corpus.column_index(TITLE_COLUMN);
    let date_idx = corpus.column_index(DATE_COLUMN);
    let source_idx = corpus.column_index(SOURCE_COLUMN);

    let cell = |row: &[String], idx: Option<usize>| -> String {
        idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
    };

    let mut documents = Vec::with_capacity(corpus.rows.len());
    for (row_index, row) in corpus.rows.iter().enumerate() {
        let clean_text = normalizer.normalize(&cell(row, text_idx));
        let id = document_id(
            &cell(row, title_idx),
            &cell(row, date_idx),
            &cell(row, source_idx),
            row_index,
        );
        documents.push(Document {
            document_id: id,
            clean_text,
            cells: row.clone(),
        });
    }

    let distinct: std::collections::HashSet<&str> =
        documents.iter().map(|d| d.document_id.as_str()).collect();
    if distinct.len() < documents.len() {
        warn!(
            rows = documents.len(),
            distinct_ids = distinct.len(),
            "Duplicate (title, date, source) metadata produced colliding document ids"
        );
    }

    DocumentTable {
        columns: corpus.columns.clone(),
        documents,
    }
}
