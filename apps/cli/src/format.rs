use colored::Colorize;
use cost_core::{DailySummary, TokenCounts};
use serde::Serialize;

const COL_DATE: usize = 12;
const COL_COST: usize = 12;
const COL_TOKENS: usize = 10;
const COL_SESSIONS: usize = 10;
const SEPARATOR_WIDTH: usize = COL_DATE + COL_COST + COL_TOKENS * 4 + COL_SESSIONS + 12;

/// JSON row; keys are emitted in sorted order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary<'a> {
    cache_creation_input_tokens: u64,
    cache_read_input_tokens: u64,
    cost: f64,
    date: &'a str,
    input_tokens: u64,
    output_tokens: u64,
    sessions: u64,
}

pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000_000 {
        format!("{:.1}B", count as f64 / 1_000_000_000.0)
    } else if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

pub fn format_cost(cost: f64) -> String {
    format!("${cost:.2}")
}

pub fn format_json(summaries: &[DailySummary]) -> serde_json::Result<String> {
    let rows: Vec<JsonSummary<'_>> = summaries
        .iter()
        .map(|summary| JsonSummary {
            cache_creation_input_tokens: summary.tokens.cache_creation_input_tokens,
            cache_read_input_tokens: summary.tokens.cache_read_input_tokens,
            cost: summary.cost_usd,
            date: &summary.date,
            input_tokens: summary.tokens.input_tokens,
            output_tokens: summary.tokens.output_tokens,
            sessions: summary.sessions,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

fn header() -> String {
    format!(
        "{:<COL_DATE$}  {:>COL_TOKENS$}  {:>COL_TOKENS$}  {:>COL_TOKENS$}  {:>COL_TOKENS$}  {:>COL_COST$}  {:>COL_SESSIONS$}",
        "Date", "Input", "Output", "Cache W", "Cache R", "Cost", "Sessions"
    )
    .dimmed()
    .to_string()
}

fn separator() -> String {
    "─".repeat(SEPARATOR_WIDTH).dimmed().to_string()
}

fn row(label: &str, tokens: &TokenCounts, cost: f64, sessions: u64, bold_label: bool) -> String {
    let label = format!("{label:<COL_DATE$}");
    let label = if bold_label {
        label.bold().white()
    } else {
        label.white()
    };
    format!(
        "{}  {}  {}  {}  {}  {}  {}",
        label,
        format!("{:>COL_TOKENS$}", format_tokens(tokens.input_tokens)).cyan(),
        format!("{:>COL_TOKENS$}", format_tokens(tokens.output_tokens)).cyan(),
        format!("{:>COL_TOKENS$}", format_tokens(tokens.cache_creation_input_tokens)).yellow(),
        format!("{:>COL_TOKENS$}", format_tokens(tokens.cache_read_input_tokens)).yellow(),
        format!("{:>COL_COST$}", format_cost(cost)).green().bold(),
        format!("{sessions:>COL_SESSIONS$}").dimmed(),
    )
}

/// Footer line describing how much of the cache was reused.
pub fn stats_line(processed: usize, cached: usize, elapsed_ms: u128) -> String {
    if processed > 0 {
        format!("{processed} files processed ({cached} cached) in {elapsed_ms}ms")
    } else {
        format!("{cached} files (all cached) in {elapsed_ms}ms")
    }
}

pub fn format_table(
    summaries: &[DailySummary],
    processed: usize,
    cached: usize,
    elapsed_ms: u128,
) -> String {
    if summaries.is_empty() {
        return "No usage data found.".dimmed().to_string();
    }

    let mut lines = vec![String::new(), header(), separator()];
    let mut totals = TokenCounts::default();
    let mut total_cost = 0.0;
    let mut total_sessions = 0u64;
    for summary in summaries {
        lines.push(row(
            &summary.date,
            &summary.tokens,
            summary.cost_usd,
            summary.sessions,
            false,
        ));
        totals.add(&summary.tokens);
        total_cost += summary.cost_usd;
        total_sessions += summary.sessions;
    }
    lines.push(separator());
    lines.push(row("TOTAL", &totals, total_cost, total_sessions, true));
    lines.push(separator());
    lines.push(header());
    lines.push(format!("  {}", stats_line(processed, cached, elapsed_ms)).dimmed().to_string());
    lines.push(String::new());
    lines.join("\n")
}

pub fn unknown_model_warning(model: &str) -> String {
    format!("Warning: Unknown model \"{model}\" - using Sonnet pricing as fallback.")
        .yellow()
        .to_string()
}
