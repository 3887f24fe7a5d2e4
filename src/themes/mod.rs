// Theme discovery — NMF topics over the fitted TF-IDF matrix.
//
// The factorization reuses the exact document-term matrix the keyword
// stage fitted, so themes and keywords describe the same vocabulary.
// Each topic becomes a corpus-level theme row; each document gets up
// to three theme assignments weighted by its topic loadings.

pub mod nmf;

use std::cmp::Ordering;

use anyhow::Result;
use tracing::info;

use crate::corpus::DocumentTable;
use crate::keywords::tfidf::TfidfModel;
use crate::records::{DocumentTheme, Theme};

/// Terms listed per theme, highest weight first.
const THEME_TOP_TERMS: usize = 10;
/// Theme assignments kept per document.
const DOCUMENT_TOP_THEMES: usize = 3;

/// Fit an NMF topic model and build the theme tables.
///
/// Returns one `Theme` per topic and up to three `DocumentTheme` rows
/// per document. Documents whose topic loadings sum to zero — empty
/// texts, or texts with no surviving vocabulary terms — get no rows.
pub fn extract_themes(
    table: &DocumentTable,
    model: &TfidfModel,
    n_topics: usize,
    seed: u64,
) -> Result<(Vec<Theme>, Vec<DocumentTheme>)> {
    let factorization = nmf::factorize(model.matrix(), n_topics, seed)?;
    let vocabulary = model.vocabulary();

    let mut themes = Vec::with_capacity(n_topics);
    for topic in 0..n_topics {
        let mut weighted: Vec<(usize, f64)> = (0..vocabulary.len())
            .map(|term| (term, factorization.h[(topic, term)]))
            .collect();
        weighted.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        let top_keywords = weighted
            .iter()
            .take(THEME_TOP_TERMS)
            .map(|&(term, _)| vocabulary[term].as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let topic_weight_sum: f64 = factorization.h.row(topic).iter().sum();

        themes.push(Theme {
            theme_id: theme_id(topic),
            top_keywords,
            topic_weight_sum,
        });
    }

    let mut document_themes = Vec::new();
    for (doc_idx, document) in table.documents.iter().enumerate() {
        let loadings: Vec<f64> = (0..n_topics)
            .map(|topic| factorization.w[(doc_idx, topic)])
            .collect();
        let total: f64 = loadings.iter().sum();
        if total == 0.0 {
            continue;
        }

        let mut ranked: Vec<(usize, f64)> = loadings.into_iter().enumerate().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        for (position, (topic, weight)) in ranked.into_iter().take(DOCUMENT_TOP_THEMES).enumerate()
        {
            document_themes.push(DocumentTheme {
                document_id: document.document_id.clone(),
                theme_id: theme_id(topic),
                weight,
                weight_norm: weight / total,
                rank: position + 1,
            });
        }
    }

    info!(
        themes = themes.len(),
        assignments = document_themes.len(),
        "Extracted themes"
    );
    Ok((themes, document_themes))
}

fn theme_id(topic: usize) -> String {
    format!("theme_{topic:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::loader::RawCorpus;
    use crate::corpus::normalizer::build_document_table;
    use crate::keywords::tfidf::{TfidfModel, TfidfOptions};
    use crate::keywords::tokenizer::TermTokenizer;

    fn two_topic_table() -> DocumentTable {
        let rows = vec![
            "The border wall expansion and border security funding debate continues.",
            "Border security agents patrol the border wall near the southern crossing.",
            "New border wall security funding cleared the committee vote.",
            "Solar energy and wind energy prices keep falling across energy markets.",
            "The solar energy farm adds wind energy capacity to the regional grid.",
            "Energy analysts expect solar energy and wind power growth to continue.",
        ];
        let corpus = RawCorpus {
            columns: vec!["full_text".to_string()],
            rows: rows
                .into_iter()
                .map(|text| vec![text.to_string()])
                .collect(),
        };
        build_document_table(&corpus)
    }

    fn fitted_model(table: &DocumentTable) -> TfidfModel {
        let tokenizer = TermTokenizer::english();
        TfidfModel::fit(&table.clean_texts(), &tokenizer, &TfidfOptions::default()).unwrap()
    }

    #[test]
    fn test_theme_ids_are_zero_padded() {
        let table = two_topic_table();
        let model = fitted_model(&table);
        let (themes, _) = extract_themes(&table, &model, 2, 42).unwrap();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].theme_id, "theme_00");
        assert_eq!(themes[1].theme_id, "theme_01");
    }

    #[test]
    fn test_theme_keywords_reflect_topic_blocks() {
        let table = two_topic_table();
        let model = fitted_model(&table);
        let (themes, _) = extract_themes(&table, &model, 2, 42).unwrap();
        let all_keywords = format!("{} | {}", themes[0].top_keywords, themes[1].top_keywords);
        assert!(all_keywords.contains("border"));
        assert!(all_keywords.contains("energy"));
    }

    #[test]
    fn test_document_theme_ranks_and_normalization() {
        let table = two_topic_table();
        let model = fitted_model(&table);
        let (_, document_themes) = extract_themes(&table, &model, 2, 42).unwrap();

        for document in &table.documents {
            let rows: Vec<_> = document_themes
                .iter()
                .filter(|row| row.document_id == document.document_id)
                .collect();
            assert_eq!(rows.len(), 2, "two topics means two rows per document");
            assert_eq!(rows[0].rank, 1);
            assert_eq!(rows[1].rank, 2);
            assert!(rows[0].weight >= rows[1].weight);
            let norm_sum: f64 = rows.iter().map(|row| row.weight_norm).sum();
            assert!((norm_sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_infeasible_topic_count_is_fatal() {
        let table = two_topic_table();
        let model = fitted_model(&table);
        assert!(extract_themes(&table, &model, 50, 42).is_err());
    }

    #[test]
    fn test_topic_weight_sum_matches_h_row() {
        let table = two_topic_table();
        let model = fitted_model(&table);
        let (themes, _) = extract_themes(&table, &model, 2, 42).unwrap();
        for theme in &themes {
            assert!(theme.topic_weight_sum > 0.0);
        }
    }
}
