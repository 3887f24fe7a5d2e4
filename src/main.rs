use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use prism::config::{self, PipelineConfig};
use prism::corpus::loader::load_corpus;
use prism::{output, pipeline};

/// Prism: keyword, theme, and sentiment signal extraction for text corpora.
///
/// Reads a CSV corpus with a `full_text` column and derives seven artifact
/// files: per-document keywords and keyphrases, a corpus keyword summary,
/// canonicalized phrase clusters, latent themes with per-document
/// assignments, and per-document sentiment.
#[derive(Parser)]
#[command(name = "prism", version, about)]
struct Cli {
    /// Input corpus CSV; must contain a `full_text` column
    /// (falls back to PRISM_INPUT)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory the artifact files are written into
    /// (falls back to PRISM_OUTPUT_DIR)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Top TF-IDF keywords kept per document
    #[arg(long, default_value_t = config::DEFAULT_MAX_KEYWORDS)]
    max_keywords: usize,

    /// Top keyphrases kept per document
    #[arg(long, default_value_t = config::DEFAULT_MAX_KEYPHRASES)]
    max_keyphrases: usize,

    /// Number of latent themes to fit
    #[arg(long, default_value_t = config::DEFAULT_N_TOPICS)]
    n_topics: usize,

    /// Seed for the decomposition stages; fixed seed means reproducible runs
    #[arg(long, default_value_t = config::DEFAULT_RANDOM_STATE)]
    random_state: u64,

    /// Leading characters of each document visible to the keyphrase extractor
    #[arg(long, default_value_t = config::DEFAULT_MAX_CHARS_FOR_KEYPHRASES)]
    max_chars_for_keyphrases: usize,

    /// Most frequent phrases kept for clustering
    #[arg(long, default_value_t = config::DEFAULT_MAX_PHRASES_FOR_CLUSTERING)]
    max_phrases_for_clustering: usize,

    /// Sentiment lexicon override file of term<TAB>valence lines
    /// (falls back to PRISM_LEXICON_PATH, then the embedded lexicon)
    #[arg(long)]
    lexicon: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("prism=info")),
        )
        .init();

    let cli = Cli::parse();

    let Some(input) = cli.input.or_else(|| config::env_path("PRISM_INPUT")) else {
        bail!("No input corpus given. Pass --input <file.csv> or set PRISM_INPUT.");
    };
    let Some(output_dir) = cli
        .output_dir
        .or_else(|| config::env_path("PRISM_OUTPUT_DIR"))
    else {
        bail!("No output directory given. Pass --output-dir <dir> or set PRISM_OUTPUT_DIR.");
    };

    let pipeline_config = PipelineConfig {
        max_keywords: cli.max_keywords,
        max_keyphrases: cli.max_keyphrases,
        n_topics: cli.n_topics,
        random_state: cli.random_state,
        max_chars_for_keyphrases: cli.max_chars_for_keyphrases,
        max_phrases_for_clustering: cli.max_phrases_for_clustering,
        lexicon_path: cli
            .lexicon
            .or_else(|| config::env_path("PRISM_LEXICON_PATH")),
    };
    pipeline_config.validate()?;

    info!(input = %input.display(), "Loading corpus");
    let corpus = load_corpus(&input)?;

    let artifacts = pipeline::run(corpus, &pipeline_config)?;
    output::write_artifacts(&artifacts, &output_dir)?;
    output::terminal::display_run_summary(&artifacts);

    println!(
        "{}",
        format!("Artifacts written to: {}", output_dir.display()).bold()
    );

    Ok(())
}
