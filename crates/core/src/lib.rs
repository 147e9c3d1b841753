pub mod pricing;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use pricing::{BASELINE_MODEL, ModelPricing, PriceSource, PricingTable, UnknownModels};

/// Extension of the log files written by the assistant.
pub const LOG_EXTENSION: &str = "jsonl";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCounts {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
}

impl TokenCounts {
    pub fn add(&mut self, other: &TokenCounts) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.cache_creation_input_tokens = self
            .cache_creation_input_tokens
            .saturating_add(other.cache_creation_input_tokens);
        self.cache_read_input_tokens = self
            .cache_read_input_tokens
            .saturating_add(other.cache_read_input_tokens);
    }
}

/// Staleness signal for a log file: modification time and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStamp {
    pub mtime_ms: i64,
    pub size: u64,
}

/// Last-ingested state of one log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub mtime_ms: i64,
    pub size: u64,
    pub session_id: String,
    pub project_dir: String,
}

impl FileRecord {
    pub fn stamp(&self) -> FileStamp {
        FileStamp {
            mtime_ms: self.mtime_ms,
            size: self.size,
        }
    }
}

/// Token usage of one file, aggregated per (date, model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub file_path: String,
    pub date: String,
    pub model: String,
    pub session_id: String,
    pub project_dir: String,
    pub tokens: TokenCounts,
    pub message_count: u64,
}

/// Classification of discovered files against the cached manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub added: Vec<FileRecord>,
    pub changed: Vec<FileRecord>,
    pub removed: Vec<String>,
    pub unchanged: Vec<String>,
}

impl DiffResult {
    /// Files that have to be (re)parsed, added first.
    pub fn to_process(&self) -> Vec<FileRecord> {
        self.added.iter().chain(&self.changed).cloned().collect()
    }

    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.changed.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCost {
    pub model: String,
    pub tokens: TokenCounts,
    pub cost_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: String,
    pub cost_usd: f64,
    pub tokens: TokenCounts,
    pub sessions: u64,
    pub models: Vec<ModelCost>,
}

impl DailySummary {
    pub fn empty(date: &str) -> Self {
        Self {
            date: date.to_string(),
            cost_usd: 0.0,
            tokens: TokenCounts::default(),
            sessions: 0,
            models: Vec::new(),
        }
    }
}

/// Inclusive date bounds (`YYYY-MM-DD`) and project substring for summary queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilter {
    pub since: Option<String>,
    pub until: Option<String>,
    pub project: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub summaries: Vec<DailySummary>,
    pub unknown_models: Vec<String>,
}

/// Session id is the log file name without its extension.
pub fn session_id_from_path(path: &str) -> String {
    let name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    let suffix = format!(".{LOG_EXTENSION}");
    match name.strip_suffix(suffix.as_str()) {
        Some(stem) => stem.to_string(),
        None => name.to_string(),
    }
}

/// Project directory is the first path segment below `root`.
pub fn project_dir_from_path(root: &str, path: &str) -> String {
    let prefix = format!("{}/", root.trim_end_matches('/'));
    let Some(relative) = path.strip_prefix(&prefix) else {
        return path.to_string();
    };
    match relative.split_once('/') {
        Some((project, _)) => project.to_string(),
        None => relative.to_string(),
    }
}
