use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default tuning values, shared by the CLI flag definitions and tests.
pub const DEFAULT_MAX_KEYWORDS: usize = 15;
pub const DEFAULT_MAX_KEYPHRASES: usize = 20;
pub const DEFAULT_N_TOPICS: usize = 10;
pub const DEFAULT_RANDOM_STATE: u64 = 42;
pub const DEFAULT_MAX_CHARS_FOR_KEYPHRASES: usize = 1000;
pub const DEFAULT_MAX_PHRASES_FOR_CLUSTERING: usize = 500;

/// Tuning knobs for one pipeline run.
///
/// All values come from CLI flags; the path-like settings fall back to
/// environment variables (loaded from .env via dotenvy at startup).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Top TF-IDF terms kept per document.
    pub max_keywords: usize,
    /// Top YAKE phrases kept per document.
    pub max_keyphrases: usize,
    /// Number of NMF topics to fit.
    pub n_topics: usize,
    /// Seed for the randomized SVD behind dimensionality reduction and
    /// topic-model initialization. Fixing it makes reruns reproducible.
    pub random_state: u64,
    /// Keyphrase extraction reads only this many leading characters of
    /// each document (a cost/accuracy tradeoff on long texts).
    pub max_chars_for_keyphrases: usize,
    /// Only the most frequent phrases, up to this many, are clustered.
    pub max_phrases_for_clustering: usize,
    /// Optional replacement sentiment lexicon (term<TAB>valence lines).
    /// When unset, the embedded English lexicon is used.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_keyphrases: DEFAULT_MAX_KEYPHRASES,
            n_topics: DEFAULT_N_TOPICS,
            random_state: DEFAULT_RANDOM_STATE,
            max_chars_for_keyphrases: DEFAULT_MAX_CHARS_FOR_KEYPHRASES,
            max_phrases_for_clustering: DEFAULT_MAX_PHRASES_FOR_CLUSTERING,
            lexicon_path: None,
        }
    }
}

impl PipelineConfig {
    /// Reject knob values that can never produce a meaningful run.
    /// Call this once before the pipeline starts.
    pub fn validate(&self) -> Result<()> {
        if self.max_keywords == 0 {
            anyhow::bail!("--max-keywords must be at least 1");
        }
        if self.max_keyphrases == 0 {
            anyhow::bail!("--max-keyphrases must be at least 1");
        }
        if self.n_topics == 0 {
            anyhow::bail!("--n-topics must be at least 1");
        }
        Ok(())
    }
}

/// Read a path from the environment, treating empty values as unset.
///
/// Used by the CLI layer to back `--input`, `--output-dir`, and
/// `--lexicon` with PRISM_INPUT, PRISM_OUTPUT_DIR, and PRISM_LEXICON_PATH.
pub fn env_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
