//! Console report for a finished run.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use token_db_core::{NormalizedTokenRecord, OutputSchema};
use token_db_lib::{PopularityStats, color_counts, top_tokens};

const TOP_TOKENS: usize = 20;
const SAMPLE_TOKENS: usize = 5;
const ABILITY_PREVIEW_CHARS: usize = 50;

fn heading(title: &str) {
    log::info!("");
    log::info!(
        "{}",
        format!("=== {title} ===").if_supports_color(Stdout, |t| t.bold()),
    );
}

/// Print the popularity distribution analysis.
pub(crate) fn print_popularity_report(tokens: &[NormalizedTokenRecord]) {
    let stats = PopularityStats::compute(tokens);

    heading("Popularity Distribution Analysis");
    log::info!("Total tokens: {}", stats.total);
    log::info!("Min popularity: {}", stats.min);
    log::info!("Max popularity: {}", stats.max);
    log::info!("Mean popularity: {:.2}", stats.mean);
    log::info!("Median popularity: {}", stats.median);
    log::info!("");
    log::info!("Percentiles:");
    for (point, value) in stats.percentiles.iter() {
        let label = if point == 50 {
            "50th (median)".to_string()
        } else {
            format!("{point}th")
        };
        log::info!("  {label}: {value:.2}");
    }

    log::info!("");
    log::info!("Top {TOP_TOKENS} most popular tokens:");
    for (i, token) in top_tokens(tokens, TOP_TOKENS).iter().enumerate() {
        log::info!(
            "  {:2}. {:30} {:8} [{:5}] - Popularity: {}",
            i + 1,
            token.name,
            token.pt,
            token.color_label(),
            token.popularity.if_supports_color(Stdout, |t| t.cyan()),
        );
    }

    log::info!("");
    log::info!("Popularity frequency distribution:");
    log::info!("Popularity | Count | Cumulative");
    log::info!("{}", "-".repeat(40));
    for row in &stats.frequency {
        log::info!(
            "{:10} | {:5} | {:10}",
            row.popularity,
            row.count,
            row.cumulative
        );
    }

    heading("Suggested Bracket Boundaries");
    let Some(plan) = &stats.brackets else {
        log::info!(
            "{}",
            "Not enough tokens to suggest brackets.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    };
    log::info!("Goal: Create 6 brackets with roughly 50 tokens each");
    log::info!("");
    for (i, threshold) in plan.thresholds.iter().enumerate() {
        match i {
            0 => log::info!("Bracket 1 (Top 50): popularity >= {threshold}"),
            _ => log::info!(
                "Bracket {}: popularity >= {threshold} (and < {})",
                i + 1,
                plan.thresholds[i - 1]
            ),
        }
    }
    if let Some(last) = plan.thresholds.last() {
        log::info!(
            "Bracket {}: popularity < {last}",
            plan.thresholds.len() + 1
        );
    }
    log::info!("");
    log::info!("Tokens per bracket:");
    for (i, count) in plan.counts.iter().enumerate() {
        log::info!("  Bracket {}: {count} tokens", i + 1);
    }
}

/// Print totals, colour breakdown and a few sample records.
pub(crate) fn print_summary(tokens: &[NormalizedTokenRecord], schema: OutputSchema) {
    heading("Token Database Summary");
    log::info!("Total tokens: {}", tokens.len());

    log::info!("");
    log::info!("Tokens by color:");
    for (color, count) in color_counts(tokens) {
        log::info!("  {color}: {count}");
    }

    log::info!("");
    log::info!("Sample tokens (first {SAMPLE_TOKENS}):");
    for token in tokens.iter().take(SAMPLE_TOKENS) {
        match schema {
            OutputSchema::Popularity => log::info!(
                "  - {} ({}) - {} [Popularity: {}]",
                token.name.if_supports_color(Stdout, |t| t.bold()),
                token.pt,
                token.type_line,
                token.popularity,
            ),
            OutputSchema::Legacy => log::info!(
                "  - {} ({}) - {}",
                token.name.if_supports_color(Stdout, |t| t.bold()),
                token.pt,
                token.type_line,
            ),
        }
        if !token.abilities.is_empty() {
            let preview: String = token.abilities.chars().take(ABILITY_PREVIEW_CHARS).collect();
            log::info!("    Abilities: {preview}...");
        }
    }
}
