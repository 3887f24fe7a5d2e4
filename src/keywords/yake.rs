// Per-document keyphrase extraction via YAKE.
//
// YAKE is statistical and local to each document — no corpus-wide fit.
// Its raw scores are lower-is-better and ranks follow the extractor's
// own output order, so keyword rows from this method read opposite to
// the TF-IDF rows. The `method` column disambiguates; scores are
// deliberately preserved untouched.

use indicatif::{ProgressBar, ProgressStyle};
use keyword_extraction::yake::{Yake, YakeParams};
use stop_words::{get, LANGUAGE};
use tracing::info;

use crate::corpus::DocumentTable;
use crate::records::{KeywordRecord, Method};

pub struct KeyphraseExtractor {
    stopwords: Vec<String>,
    /// Keep at most this many phrases per document.
    pub max_keyphrases: usize,
    /// Scan only this many leading characters of each document — a
    /// cost/accuracy tradeoff on long texts.
    pub max_chars: usize,
}

impl KeyphraseExtractor {
    pub fn new(max_keyphrases: usize, max_chars: usize) -> Self {
        Self {
            stopwords: get(LANGUAGE::English),
            max_keyphrases,
            max_chars,
        }
    }

    /// Ranked phrases for one document in YAKE's own order (most
    /// relevant first, ascending raw score). Empty text yields nothing.
    pub fn extract(&self, text: &str) -> Vec<(String, f64)> {
        let truncated = prefix_chars(text, self.max_chars);
        if truncated.trim().is_empty() {
            return Vec::new();
        }
        let yake = Yake::new(YakeParams::WithDefaults(truncated, &self.stopwords));
        yake.get_ranked_term_scores(self.max_keyphrases)
            .into_iter()
            .map(|(phrase, score)| (phrase, score as f64))
            .collect()
    }

    /// Keyword rows for every document, ranks 1-based in extraction order.
    pub fn extract_records(&self, table: &DocumentTable) -> Vec<KeywordRecord> {
        let pb = ProgressBar::new(table.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Keyphrases [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        let mut records = Vec::new();
        for document in &table.documents {
            for (idx, (phrase, score)) in self.extract(&document.clean_text).into_iter().enumerate()
            {
                records.push(KeywordRecord {
                    document_id: document.document_id.clone(),
                    keyword: phrase,
                    method: Method::Yake,
                    score,
                    rank: idx + 1,
                });
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            records = records.len(),
            documents = table.len(),
            "Extracted keyphrases"
        );
        records
    }
}

/// The first `max_chars` characters of a string, respecting UTF-8
/// boundaries. Unlike display truncation, no ellipsis is appended — the
/// extractor must see an exact prefix of the original text.
fn prefix_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
