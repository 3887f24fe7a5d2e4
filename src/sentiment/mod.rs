// Lexicon-based sentiment scoring.
//
// A VADER-style intensity scorer: per-token valences from the lexicon,
// adjusted by negators within a three-token window and by intensity
// boosters with distance decay, then folded into a compound score in
// [-1, 1]. Runs per document over normalized text with no
// cross-document state, so scores never change when the corpus grows.

pub mod lexicon;

use std::collections::{HashMap, HashSet};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::corpus::DocumentTable;
use crate::records::{SentimentLabel, SentimentRecord};
use lexicon::SentimentLexicon;

/// Dampened sign flip applied by a preceding negator.
const N_SCALAR: f64 = -0.74;
/// Intensity added (or removed) by a booster word.
const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
/// Normalization constant in `sum / sqrt(sum^2 + alpha)`.
const NORMALIZATION_ALPHA: f64 = 15.0;
/// How many preceding tokens are scanned for negators and boosters.
const CONTEXT_WINDOW: usize = 3;

const NEGATORS: &[&str] = &[
    "ain't", "aint", "aren't", "arent", "can't", "cannot", "cant", "couldn't", "couldnt",
    "despite", "didn't", "didnt", "doesn't", "doesnt", "don't", "dont", "hadn't", "hadnt",
    "hasn't", "hasnt", "haven't", "havent", "isn't", "isnt", "neither", "never", "no", "nobody",
    "none", "nor", "not", "nothing", "nowhere", "rarely", "seldom", "shouldn't", "shouldnt",
    "wasn't", "wasnt", "weren't", "werent", "without", "won't", "wont", "wouldn't", "wouldnt",
];

const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", B_INCR),
    ("almost", B_DECR),
    ("amazingly", B_INCR),
    ("awfully", B_INCR),
    ("barely", B_DECR),
    ("completely", B_INCR),
    ("considerably", B_INCR),
    ("decidedly", B_INCR),
    ("deeply", B_INCR),
    ("enormously", B_INCR),
    ("entirely", B_INCR),
    ("especially", B_INCR),
    ("exceptionally", B_INCR),
    ("extremely", B_INCR),
    ("greatly", B_INCR),
    ("hardly", B_DECR),
    ("highly", B_INCR),
    ("hugely", B_INCR),
    ("incredibly", B_INCR),
    ("intensely", B_INCR),
    ("kinda", B_DECR),
    ("less", B_DECR),
    ("little", B_DECR),
    ("marginally", B_DECR),
    ("occasionally", B_DECR),
    ("particularly", B_INCR),
    ("partly", B_DECR),
    ("purely", B_INCR),
    ("quite", B_INCR),
    ("really", B_INCR),
    ("remarkably", B_INCR),
    ("scarcely", B_DECR),
    ("slightly", B_DECR),
    ("so", B_INCR),
    ("somewhat", B_DECR),
    ("substantially", B_INCR),
    ("thoroughly", B_INCR),
    ("totally", B_INCR),
    ("tremendously", B_INCR),
    ("unusually", B_INCR),
    ("utterly", B_INCR),
    ("very", B_INCR),
];

/// The four per-document scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScores {
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScores {
    fn zero() -> Self {
        Self {
            compound: 0.0,
            positive: 0.0,
            neutral: 0.0,
            negative: 0.0,
        }
    }
}

pub struct SentimentScorer {
    lexicon: SentimentLexicon,
    negators: HashSet<&'static str>,
    boosters: HashMap<&'static str, f64>,
}

impl SentimentScorer {
    pub fn new(lexicon: SentimentLexicon) -> Self {
        Self {
            lexicon,
            negators: NEGATORS.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
        }
    }

    /// Score one text. Empty or lexicon-free text scores all zeros with
    /// a neutral share of 1.0 when any tokens exist at all.
    pub fn score(&self, text: &str) -> SentimentScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScores::zero();
        }

        let mut valences = Vec::with_capacity(tokens.len());
        for (position, token) in tokens.iter().enumerate() {
            let Some(base) = self.lexicon.valence(token) else {
                // Boosters and negators carry no valence of their own.
                valences.push(0.0);
                continue;
            };
            valences.push(self.contextual_valence(base, position, &tokens));
        }

        let sum: f64 = valences.iter().sum();
        let compound = (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0);

        // Positive and negative shares weight each hit by its distance
        // from neutral; plain tokens count once toward the neutral mass.
        let mut positive_mass = 0.0;
        let mut negative_mass = 0.0;
        let mut neutral_count = 0.0;
        for &valence in &valences {
            if valence > 0.0 {
                positive_mass += valence + 1.0;
            } else if valence < 0.0 {
                negative_mass += valence.abs() + 1.0;
            } else {
                neutral_count += 1.0;
            }
        }
        let total = positive_mass + negative_mass + neutral_count;
        if total == 0.0 {
            return SentimentScores::zero();
        }

        SentimentScores {
            compound,
            positive: positive_mass / total,
            neutral: neutral_count / total,
            negative: negative_mass / total,
        }
    }

    /// Adjust a token's base valence using the preceding window. Prior
    /// tokens that are themselves lexicon entries carry their own
    /// valence and are skipped here.
    fn contextual_valence(&self, base: f64, position: usize, tokens: &[String]) -> f64 {
        let mut valence = base;
        for distance in 1..=CONTEXT_WINDOW {
            if position < distance {
                break;
            }
            let prior = tokens[position - distance].as_str();
            if self.lexicon.contains(prior) {
                continue;
            }
            if let Some(&boost) = self.boosters.get(prior) {
                let mut scalar = if valence < 0.0 { -boost } else { boost };
                if distance == 2 {
                    scalar *= 0.95;
                } else if distance == 3 {
                    scalar *= 0.9;
                }
                valence += scalar;
            }
            if self.negators.contains(prior) {
                valence *= N_SCALAR;
            }
        }
        valence
    }

    /// Score every document in table order.
    pub fn score_documents(&self, table: &DocumentTable) -> Vec<SentimentRecord> {
        let pb = ProgressBar::new(table.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Sentiment  [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        let mut records = Vec::with_capacity(table.len());
        for document in &table.documents {
            let scores = self.score(&document.clean_text);
            records.push(SentimentRecord {
                document_id: document.document_id.clone(),
                sentiment_label: SentimentLabel::from_compound(scores.compound),
                compound: scores.compound,
                positive: scores.positive,
                neutral: scores.neutral,
                negative: scores.negative,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(documents = records.len(), "Scored sentiment");
        records
    }
}

/// Whitespace-split tokens with surrounding punctuation stripped.
/// Inner apostrophes survive so negator contractions match.
fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
        })
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect()
}
