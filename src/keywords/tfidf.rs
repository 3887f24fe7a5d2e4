// Corpus-level TF-IDF fitting.
//
// Builds a sparse document-by-term weight matrix over unigrams and
// bigrams, with document-frequency filtering at both ends: terms in more
// than 80% of documents are near-stopwords, terms in fewer than 2 are
// noise. The fitted model is an immutable value — the topic modeler
// reads the same matrix and vocabulary so themes and keywords share one
// term space.

use std::collections::HashMap;

use anyhow::Result;
use sprs::{CsMat, TriMat};
use tracing::info;

use super::tokenizer::TermTokenizer;
use crate::corpus::DocumentTable;
use crate::records::{KeywordRecord, Method};

/// Document-frequency bounds for the corpus fit.
pub struct TfidfOptions {
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum fraction of documents a term may appear in.
    pub max_df_ratio: f64,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df_ratio: 0.8,
        }
    }
}

impl TfidfOptions {
    /// No filtering at all — used for the phrase-level fit where every
    /// phrase is a tiny document.
    pub fn unfiltered() -> Self {
        Self {
            min_df: 1,
            max_df_ratio: 1.0,
        }
    }
}

/// A fitted TF-IDF model: L2-normalized weight matrix plus the
/// alphabetically ordered vocabulary that indexes its columns.
pub struct TfidfModel {
    vocabulary: Vec<String>,
    matrix: CsMat<f64>,
}

impl TfidfModel {
    /// Fit over a corpus of normalized texts.
    ///
    /// Weighting is raw term count times smoothed IDF
    /// (ln((1+n)/(1+df)) + 1), each document row L2-normalized.
    /// An empty corpus or a vocabulary emptied by the document-frequency
    /// filter aborts the fit — downstream artifacts would be meaningless.
    pub fn fit(texts: &[String], tokenizer: &TermTokenizer, options: &TfidfOptions) -> Result<Self> {
        let n_docs = texts.len();
        if n_docs == 0 {
            anyhow::bail!("Cannot fit a TF-IDF model over an empty corpus");
        }

        // Per-document term counts and corpus document frequencies.
        let mut doc_counts: Vec<HashMap<String, usize>> = Vec::with_capacity(n_docs);
        let mut df: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for term in tokenizer.terms(text) {
                *counts.entry(term).or_insert(0) += 1;
            }
            for term in counts.keys() {
                *df.entry(term.clone()).or_insert(0) += 1;
            }
            doc_counts.push(counts);
        }

        let max_df_count = options.max_df_ratio * n_docs as f64;
        let mut vocabulary: Vec<String> = df
            .iter()
            .filter(|(_, &count)| count >= options.min_df && count as f64 <= max_df_count)
            .map(|(term, _)| term.clone())
            .collect();
        vocabulary.sort();

        if vocabulary.is_empty() {
            anyhow::bail!(
                "TF-IDF vocabulary is empty after document-frequency filtering \
                 ({} documents, min_df {}, max_df {:.2}) — corpus is too small or too uniform",
                n_docs,
                options.min_df,
                options.max_df_ratio
            );
        }

        let vocab_index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| ((1.0 + n_docs as f64) / (1.0 + df[term] as f64)).ln() + 1.0)
            .collect();

        let mut tri = TriMat::new((n_docs, vocabulary.len()));
        for (row, counts) in doc_counts.iter().enumerate() {
            let mut entries: Vec<(usize, f64)> = counts
                .iter()
                .filter_map(|(term, &count)| {
                    vocab_index
                        .get(term.as_str())
                        .map(|&col| (col, count as f64 * idf[col]))
                })
                .collect();
            // Column order makes the CSR layout (and every rerun) identical.
            entries.sort_by_key(|&(col, _)| col);

            let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (col, weight) in entries {
                    tri.add_triplet(row, col, weight / norm);
                }
            }
        }

        info!(
            documents = n_docs,
            terms = vocabulary.len(),
            "Fitted TF-IDF model"
        );

        Ok(Self {
            vocabulary,
            matrix: tri.to_csr(),
        })
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// The fitted document-by-term matrix (rows L2-normalized).
    pub fn matrix(&self) -> &CsMat<f64> {
        &self.matrix
    }

    pub fn n_documents(&self) -> usize {
        self.matrix.rows()
    }

    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// The document's `k` highest-weight nonzero terms as
    /// (vocabulary index, weight), descending by weight, ties broken by
    /// vocabulary order. Zero-weight terms never appear.
    pub fn top_terms(&self, doc: usize, k: usize) -> Vec<(usize, f64)> {
        let row = match self.matrix.outer_view(doc) {
            Some(row) => row,
            None => return Vec::new(),
        };
        let mut entries: Vec<(usize, f64)> = row
            .indices()
            .iter()
            .zip(row.data().iter())
            .map(|(&col, &weight)| (col, weight))
            .collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        entries.truncate(k);
        entries
    }
}

/// Per-document keyword rows from a fitted model: the top `max_keywords`
/// terms each, ranked 1-based by descending weight.
pub fn keyword_records(
    table: &DocumentTable,
    model: &TfidfModel,
    max_keywords: usize,
) -> Vec<KeywordRecord> {
    let mut records = Vec::new();
    for (doc_idx, document) in table.documents.iter().enumerate() {
        for (rank, (term_idx, weight)) in model.top_terms(doc_idx, max_keywords).iter().enumerate()
        {
            records.push(KeywordRecord {
                document_id: document.document_id.clone(),
                keyword: model.vocabulary()[*term_idx].clone(),
                method: Method::Tfidf,
                score: *weight,
                rank: rank + 1,
            });
        }
    }
    records
}
