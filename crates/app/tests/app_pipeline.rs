use std::fs;
use std::path::Path;

use chrono::{FixedOffset, Local};
use cost_app::{AppError, AppPaths, AppState, history_filter};
use cost_core::SummaryFilter;
use ingest::LogParser;
use tempfile::tempdir;

fn usage_line(ts: &str, id: &str, model: &str, input: u64) -> String {
    format!(
        r#"{{"timestamp":"{ts}","requestId":"req-{id}","message":{{"id":"{id}","model":"{model}","usage":{{"input_tokens":{input},"output_tokens":0}}}}}}"#
    )
}

fn write_log(projects: &Path, project: &str, name: &str, lines: &[String]) {
    let dir = projects.join(project);
    fs::create_dir_all(&dir).expect("create project dir");
    fs::write(dir.join(name), lines.join("\n")).expect("write log");
}

fn utc_state(root: &Path) -> AppState {
    let paths = AppPaths::new(root.join("cache"), root.join("projects"));
    AppState::with_parser(paths, LogParser::with_offset(FixedOffset::east_opt(0).expect("utc")))
}

#[test]
fn run_ingestion_creates_cache_and_reports_counts() {
    let dir = tempdir().expect("temp dir");
    let projects = dir.path().join("projects");
    write_log(
        &projects,
        "-home-u-alpha",
        "s1.jsonl",
        &[
            usage_line("2025-01-01T09:00:00Z", "m1", "claude-sonnet-4-6", 1_000_000),
            usage_line("2025-01-02T09:00:00Z", "m2", "claude-opus-4-6", 1_000_000),
        ],
    );
    write_log(
        &projects,
        "-home-u-beta",
        "s2.jsonl",
        &[usage_line("2025-01-02T10:00:00Z", "m3", "claude-next-7", 1_000_000)],
    );
    let state = utc_state(dir.path());

    let first = state
        .run_ingestion(false, &SummaryFilter::default())
        .expect("first run");
    assert!(state.config.paths.db_path.exists());
    assert_eq!(first.files_processed, 2);
    assert_eq!(first.files_cached, 0);
    assert_eq!(first.unknown_models, vec!["claude-next-7".to_string()]);
    let costs: Vec<f64> = first.summaries.iter().map(|s| s.cost_usd).collect();
    assert_eq!(costs.len(), 2);
    assert!((costs[0] - 3.0).abs() < 1e-9);
    assert!((costs[1] - 8.0).abs() < 1e-9);
    assert_eq!(first.summaries[1].sessions, 2);

    let second = state
        .run_ingestion(false, &SummaryFilter::default())
        .expect("second run");
    assert_eq!(second.files_processed, 0);
    assert_eq!(second.files_cached, 2);
    assert_eq!(second.summaries, first.summaries);

    let beta = state
        .run_ingestion(
            false,
            &SummaryFilter {
                project: Some("beta".to_string()),
                ..SummaryFilter::default()
            },
        )
        .expect("filtered run");
    assert_eq!(beta.summaries.len(), 1);
    assert_eq!(beta.summaries[0].date, "2025-01-02");
}

#[test]
fn pricing_overrides_win_over_builtin_rates() {
    let dir = tempdir().expect("temp dir");
    let projects = dir.path().join("projects");
    write_log(
        &projects,
        "app",
        "s1.jsonl",
        &[usage_line("2025-01-01T09:00:00Z", "m1", "claude-sonnet-4-6", 1_000_000)],
    );
    let cache = dir.path().join("cache");
    fs::create_dir_all(&cache).expect("cache dir");
    fs::write(
        cache.join("pricing.json"),
        r#"{"claude-sonnet-4-6":{"inputPerMillion":10.0,"outputPerMillion":20.0,"cacheCreatePerMillion":1.0,"cacheReadPerMillion":0.5}}"#,
    )
    .expect("write overrides");

    let state = utc_state(dir.path());
    let result = state
        .run_ingestion(false, &SummaryFilter::default())
        .expect("run");
    assert!((result.summaries[0].cost_usd - 10.0).abs() < 1e-9);
}

#[test]
fn malformed_pricing_overrides_are_ignored() {
    let dir = tempdir().expect("temp dir");
    let cache = dir.path().join("cache");
    fs::create_dir_all(&cache).expect("cache dir");
    fs::write(cache.join("pricing.json"), "{not json").expect("write overrides");

    let state = utc_state(dir.path());
    let (pricing, _) = state.pricing().lookup("claude-sonnet-4-6");
    assert_eq!(pricing.input_per_million, 3.0);
}

#[test]
fn cache_path_that_cannot_be_created_is_unavailable() {
    let dir = tempdir().expect("temp dir");
    let blocker = dir.path().join("cache");
    fs::write(&blocker, "not a directory").expect("write blocker");

    let state = utc_state(dir.path());
    let err = state
        .run_ingestion(false, &SummaryFilter::default())
        .expect_err("cache unavailable");
    assert!(matches!(err, AppError::CacheUnavailable { .. }));
}

#[test]
fn force_rebuild_reprocesses_cached_files() {
    let dir = tempdir().expect("temp dir");
    let projects = dir.path().join("projects");
    write_log(
        &projects,
        "app",
        "s1.jsonl",
        &[usage_line("2025-01-01T09:00:00Z", "m1", "claude-sonnet-4-6", 10)],
    );
    let state = utc_state(dir.path());
    state
        .run_ingestion(false, &SummaryFilter::default())
        .expect("first run");
    let rebuilt = state
        .run_ingestion(true, &SummaryFilter::default())
        .expect("rebuild");
    assert_eq!(rebuilt.files_processed, 1);
    assert_eq!(rebuilt.files_cached, 0);
    assert_eq!(rebuilt.summaries.len(), 1);
}

#[test]
fn today_and_history_use_local_dates() {
    let dir = tempdir().expect("temp dir");
    let projects = dir.path().join("projects");
    let today_date = Local::now().date_naive();
    let noon = today_date
        .and_hms_opt(12, 0, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .expect("local noon")
        .to_rfc3339();
    write_log(
        &projects,
        "app",
        "s1.jsonl",
        &[
            usage_line(&noon, "m1", "claude-haiku-4-5-20251001", 1_000_000),
            usage_line("2001-01-01T12:00:00Z", "m2", "claude-haiku-4-5-20251001", 1_000_000),
        ],
    );
    let paths = AppPaths::new(dir.path().join("cache"), projects);
    let state = AppState::new(paths);

    let today = state.today().expect("today");
    assert!((today.cost_usd - 1.0).abs() < 1e-9);
    assert_eq!(today.sessions, 1);

    let history = state.history(30).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].date, today.date);

    let filter = history_filter(today_date, 30);
    assert!(filter.since.as_deref() <= Some(today.date.as_str()));
}

#[test]
fn today_is_empty_without_logs() {
    let dir = tempdir().expect("temp dir");
    let state = utc_state(dir.path());
    let today = state.today().expect("today");
    assert_eq!(today.cost_usd, 0.0);
    assert_eq!(today.sessions, 0);
    assert!(today.models.is_empty());
}
