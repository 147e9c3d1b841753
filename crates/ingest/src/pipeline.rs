use std::collections::HashSet;
use std::time::Instant;

use cost_db::Db;

use crate::parser::LogParser;
use crate::scanner::{FileScanner, diff};
use crate::types::{IngestReport, Result};

/// Bring the cache in line with the files under the scanner's root.
///
/// Only added and changed files are parsed; their rows, the rows of removed
/// files and the new manifest entries are committed in one transaction.
pub fn run_ingestion(
    db: &mut Db,
    scanner: &FileScanner,
    parser: &LogParser,
    force_rebuild: bool,
) -> Result<IngestReport> {
    let started = Instant::now();
    if force_rebuild {
        tracing::info!("clearing cache for rebuild");
        db.clear()?;
    }

    let discovery = scanner.discover();
    let cached = db.cached_file_metadata()?;
    let diff = diff(&discovery.files, &cached);
    let to_process = diff.to_process();

    let mut report = IngestReport {
        files_discovered: discovery.files.len(),
        files_added: diff.added.len(),
        files_changed: diff.changed.len(),
        files_removed: diff.removed.len(),
        files_processed: to_process.len(),
        files_cached: diff.unchanged.len(),
        issues: discovery.issues,
        ..IngestReport::default()
    };

    if diff.has_changes() {
        let mut seen = HashSet::new();
        let outcome = parser.parse_files(&to_process, &mut seen);
        report.duplicates_skipped = outcome.duplicates_skipped;
        report.issues.extend(outcome.issues);
        report.write = db.write_results(&to_process, &outcome.records, &diff.removed)?;
    }

    tracing::info!(
        root = %scanner.root().display(),
        discovered = report.files_discovered,
        processed = report.files_processed,
        cached = report.files_cached,
        removed = report.files_removed,
        issues = report.issues.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "ingest complete"
    );
    Ok(report)
}
