// Pipeline orchestration — one synchronous pass over the corpus.
//
// Stage order matters: the TF-IDF model fitted for keywords is reused
// read-only by the theme stage so both speak the same vocabulary, and
// every stage consumes the document table built first. Model-fit
// failures abort the run; empty derived collections do not.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::corpus::loader::RawCorpus;
use crate::corpus::normalizer::build_document_table;
use crate::corpus::DocumentTable;
use crate::keywords::aggregate;
use crate::keywords::tfidf::{keyword_records, TfidfModel, TfidfOptions};
use crate::keywords::tokenizer::TermTokenizer;
use crate::keywords::yake::KeyphraseExtractor;
use crate::phrases;
use crate::records::{
    DocumentTheme, KeywordRecord, KeywordSummary, PhraseCluster, SentimentRecord, Theme,
};
use crate::sentiment::lexicon::SentimentLexicon;
use crate::sentiment::SentimentScorer;
use crate::themes;

/// Everything one run produces, in memory, ready for the writer.
pub struct Artifacts {
    pub documents: DocumentTable,
    pub keywords: Vec<KeywordRecord>,
    pub keyword_summary: Vec<KeywordSummary>,
    pub phrase_clusters: BTreeMap<usize, PhraseCluster>,
    pub themes: Vec<Theme>,
    pub document_themes: Vec<DocumentTheme>,
    pub sentiment: Vec<SentimentRecord>,
}

impl Artifacts {
    fn empty(documents: DocumentTable) -> Self {
        Self {
            documents,
            keywords: Vec::new(),
            keyword_summary: Vec::new(),
            phrase_clusters: BTreeMap::new(),
            themes: Vec::new(),
            document_themes: Vec::new(),
            sentiment: Vec::new(),
        }
    }
}

/// Run every stage over an already-loaded corpus.
pub fn run(corpus: RawCorpus, config: &PipelineConfig) -> Result<Artifacts> {
    let table = build_document_table(&corpus);
    if table.is_empty() {
        info!("Corpus has no rows; emitting empty artifacts");
        return Ok(Artifacts::empty(table));
    }

    // Stage 1: corpus-wide lexical model, shared with the theme stage.
    let tokenizer = TermTokenizer::english();
    let texts = table.clean_texts();
    let model = TfidfModel::fit(&texts, &tokenizer, &TfidfOptions::default())
        .context("TF-IDF fit failed")?;
    let tfidf_keywords = keyword_records(&table, &model, config.max_keywords);
    info!(records = tfidf_keywords.len(), "Extracted TF-IDF keywords");

    // Stage 2: per-document keyphrases, no corpus-wide state.
    let extractor = KeyphraseExtractor::new(config.max_keyphrases, config.max_chars_for_keyphrases);
    let yake_keywords = extractor.extract_records(&table);

    // Stage 3: merge and summarize both keyword methods.
    let keywords = aggregate::combine(tfidf_keywords, yake_keywords);
    let keyword_summary = aggregate::summarize(&keywords);
    info!(
        keywords = keywords.len(),
        summary_rows = keyword_summary.len(),
        "Aggregated keywords"
    );
    for row in keyword_summary.iter().take(10) {
        debug!(
            keyword = %row.keyword,
            method = %row.method,
            documents = row.document_frequency,
            mentions = row.total_mentions,
            "Top keyword"
        );
    }

    // Stage 4: canonicalize phrase variants.
    let phrase_clusters = phrases::cluster_phrases(
        &keywords,
        config.max_phrases_for_clustering,
        config.random_state,
    )
    .context("Phrase clustering failed")?;

    // Stage 5: themes over the same fitted model.
    let (themes, document_themes) =
        themes::extract_themes(&table, &model, config.n_topics, config.random_state)
            .context("Theme extraction failed")?;

    // Stage 6: sentiment, one scorer for the whole run.
    let lexicon = match &config.lexicon_path {
        Some(path) => SentimentLexicon::from_file(path)?,
        None => SentimentLexicon::embedded(),
    };
    let scorer = SentimentScorer::new(lexicon);
    let sentiment = scorer.score_documents(&table);

    Ok(Artifacts {
        documents: table,
        keywords,
        keyword_summary,
        phrase_clusters,
        themes,
        document_themes,
        sentiment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;

    fn small_corpus() -> RawCorpus {
        let texts = [
            "Border security funding and border wall construction dominate the debate.",
            "The border wall expansion plan faces new border security criticism.",
            "Solar energy growth and wind energy investment accelerate this year.",
            "Wind energy and solar energy projects win state support.",
            "Energy policy shifts toward solar energy and wind power expansion.",
        ];
        RawCorpus {
            columns: vec!["title".to_string(), "full_text".to_string()],
            rows: texts
                .iter()
                .enumerate()
                .map(|(i, text)| vec![format!("story {i}"), text.to_string()])
                .collect(),
        }
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            n_topics: 2,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_full_run_produces_every_artifact() {
        let artifacts = run(small_corpus(), &small_config()).unwrap();
        assert_eq!(artifacts.documents.len(), 5);
        assert!(!artifacts.keywords.is_empty());
        assert!(!artifacts.keyword_summary.is_empty());
        assert!(!artifacts.phrase_clusters.is_empty());
        assert_eq!(artifacts.themes.len(), 2);
        assert!(!artifacts.document_themes.is_empty());
        assert_eq!(artifacts.sentiment.len(), 5);
    }

    #[test]
    fn test_empty_corpus_short_circuits() {
        let corpus = RawCorpus {
            columns: vec!["full_text".to_string()],
            rows: Vec::new(),
        };
        let artifacts = run(corpus, &small_config()).unwrap();
        assert!(artifacts.documents.is_empty());
        assert!(artifacts.keywords.is_empty());
        assert!(artifacts.keyword_summary.is_empty());
        assert!(artifacts.phrase_clusters.is_empty());
        assert!(artifacts.themes.is_empty());
        assert!(artifacts.sentiment.is_empty());
    }

    #[test]
    fn test_infeasible_topics_abort_the_run() {
        let config = PipelineConfig {
            n_topics: 100,
            ..PipelineConfig::default()
        };
        assert!(run(small_corpus(), &config).is_err());
    }

    #[test]
    fn test_missing_lexicon_override_is_fatal() {
        let config = PipelineConfig {
            n_topics: 2,
            lexicon_path: Some(std::path::PathBuf::from("/nonexistent/lexicon.txt")),
            ..PipelineConfig::default()
        };
        assert!(run(small_corpus(), &config).is_err());
    }
}
