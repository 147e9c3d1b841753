use cost_db::WriteStats;
use serde::Serialize;

/// Outcome of one scan → diff → parse → write cycle.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub files_discovered: usize,
    pub files_added: usize,
    pub files_changed: usize,
    pub files_removed: usize,
    /// Added plus changed files that were parsed this run.
    pub files_processed: usize,
    /// Files whose cached rows were reused untouched.
    pub files_cached: usize,
    pub duplicates_skipped: usize,
    #[serde(skip)]
    pub write: WriteStats,
    pub issues: Vec<IngestIssue>,
}

/// Non-fatal issues encountered during ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestIssue {
    pub file_path: String,
    pub message: String,
}

/// Errors emitted by the ingest pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("db error: {0}")]
    Db(#[from] cost_db::DbError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
