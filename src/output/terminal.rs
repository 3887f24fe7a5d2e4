// Colored terminal summary for a completed run.
//
// Pure formatting over the in-memory artifacts. The persisted files
// are the real interface; this is the operator-facing digest printed
// after the writer finishes.

use colored::Colorize;

use crate::pipeline::Artifacts;
use crate::records::SentimentLabel;

/// Keyword summary rows shown in the digest.
const SUMMARY_KEYWORD_ROWS: usize = 10;

/// Display the post-run digest: artifact sizes, the strongest keywords,
/// the fitted themes, and the sentiment split.
pub fn display_run_summary(artifacts: &Artifacts) {
    println!(
        "\n{}",
        format!(
            "=== Extraction Summary ({} documents) ===",
            artifacts.documents.len()
        )
        .bold()
    );
    println!();

    println!("  {:<28} {:>8}", "Artifact".dimmed(), "Rows".dimmed());
    println!("  {}", "-".repeat(38).dimmed());
    println!("  {:<28} {:>8}", "documents", artifacts.documents.len());
    println!(
        "  {:<28} {:>8}",
        "document_keywords",
        artifacts.keywords.len()
    );
    println!(
        "  {:<28} {:>8}",
        "corpus_keyword_summary",
        artifacts.keyword_summary.len()
    );
    println!(
        "  {:<28} {:>8}",
        "keyphrase_clusters",
        artifacts.phrase_clusters.len()
    );
    println!("  {:<28} {:>8}", "themes", artifacts.themes.len());
    println!(
        "  {:<28} {:>8}",
        "document_themes",
        artifacts.document_themes.len()
    );
    println!(
        "  {:<28} {:>8}",
        "document_sentiment",
        artifacts.sentiment.len()
    );

    if !artifacts.keyword_summary.is_empty() {
        println!("\n{}", "=== Top Keywords ===".bold());
        println!();
        println!(
            "  {:<28} {:<7} {:>5} {:>9} {:>10}",
            "Keyword".dimmed(),
            "Method".dimmed(),
            "Docs".dimmed(),
            "Mentions".dimmed(),
            "Mean rank".dimmed(),
        );
        println!("  {}", "-".repeat(64).dimmed());
        for row in artifacts.keyword_summary.iter().take(SUMMARY_KEYWORD_ROWS) {
            println!(
                "  {:<28} {:<7} {:>5} {:>9} {:>10.2}",
                super::truncate_chars(&row.keyword, 26),
                row.method.as_str(),
                row.document_frequency,
                row.total_mentions,
                row.mean_rank,
            );
        }
    }

    if !artifacts.themes.is_empty() {
        println!("\n{}", "=== Themes ===".bold());
        println!();
        for theme in &artifacts.themes {
            println!(
                "  {}  {}",
                theme.theme_id.cyan(),
                super::truncate_chars(&theme.top_keywords, 90).dimmed()
            );
        }
    }

    if !artifacts.sentiment.is_empty() {
        let positive = count_label(artifacts, SentimentLabel::Positive);
        let neutral = count_label(artifacts, SentimentLabel::Neutral);
        let negative = count_label(artifacts, SentimentLabel::Negative);

        println!("\n{}", "=== Sentiment ===".bold());
        println!();
        if positive > 0 {
            println!("  {} {} positive documents", "+".green(), positive);
        }
        if neutral > 0 {
            println!("  {} {} neutral documents", "~".yellow(), neutral);
        }
        if negative > 0 {
            println!("  {} {} negative documents", "-".red(), negative);
        }
    }

    println!();
}

fn count_label(artifacts: &Artifacts, label: SentimentLabel) -> usize {
    artifacts
        .sentiment
        .iter()
        .filter(|record| record.sentiment_label == label)
        .count()
}
