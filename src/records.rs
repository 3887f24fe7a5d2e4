// Output record types — one struct per derived artifact row.
//
// These are the types that flow through the pipeline. They're separate
// from the extraction stages so the output writers can serialize them
// without depending on any model internals.

use serde::{Deserialize, Serialize};

/// Which extractor produced a keyword row.
///
/// The two methods rank in opposite directions: TF-IDF ranks follow
/// descending weight, YAKE ranks follow its own ascending-raw-score
/// order. Consumers must treat `method` as the disambiguating context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Tfidf,
    Yake,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Tfidf => "tfidf",
            Method::Yake => "yake",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One extracted keyword for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    pub document_id: String,
    pub keyword: String,
    pub method: Method,
    pub score: f64,
    /// 1-based, contiguous within each (document_id, method) group.
    pub rank: usize,
}

/// Corpus-wide usage statistics for one (keyword, method) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordSummary {
    pub keyword: String,
    pub method: Method,
    /// Number of distinct documents the keyword was extracted from.
    pub document_frequency: usize,
    pub total_mentions: usize,
    pub mean_rank: f64,
    pub mean_score: f64,
}

/// One group of near-duplicate phrases with a human-readable representative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseCluster {
    /// Shortest member, ties broken by encounter order.
    pub canonical_phrase: String,
    pub members: Vec<String>,
}

/// One latent topic's term profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Zero-padded sequence index ("theme_00", ...), stable within a run only.
    pub theme_id: String,
    /// Top 10 terms by weight, joined with ", ".
    pub top_keywords: String,
    /// Sum of all term weights — a rough topic mass, not a probability.
    pub topic_weight_sum: f64,
}

/// One of a document's top-3 topic assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTheme {
    pub document_id: String,
    pub theme_id: String,
    pub weight: f64,
    /// Weight divided by the document's full topic-vector sum.
    pub weight_norm: f64,
    pub rank: usize,
}

/// Categorical sentiment, thresholded on the compound score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// Apply the label policy to a compound score in [-1, 1].
    pub fn from_compound(compound: f64) -> Self {
        match compound {
            c if c >= 0.05 => SentimentLabel::Positive,
            c if c <= -0.05 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Polarity scores for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub document_id: String,
    pub sentiment_label: SentimentLabel,
    pub compound: f64,
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}
