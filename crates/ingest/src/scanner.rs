use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use cost_core::{
    DiffResult, FileRecord, FileStamp, LOG_EXTENSION, project_dir_from_path, session_id_from_path,
};
use walkdir::WalkDir;

use crate::types::IngestIssue;

/// Log files found under the root plus anything that could not be inspected.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub files: Vec<FileRecord>,
    pub issues: Vec<IngestIssue>,
}

/// Walks a projects directory for usage logs. Never reads file contents.
#[derive(Debug, Clone)]
pub struct FileScanner {
    root: PathBuf,
}

fn is_log_path(path: &Path) -> bool {
    path.extension().and_then(|value| value.to_str()) == Some(LOG_EXTENSION)
}

impl FileScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn discover(&self) -> Discovery {
        let mut discovery = Discovery::default();
        if !self.root.is_dir() {
            tracing::debug!(root = %self.root.display(), "projects directory missing");
            return discovery;
        }
        let root_str = self.root.to_string_lossy();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let file_path = err
                        .path()
                        .map(|path| path.to_string_lossy().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    tracing::debug!(path = %file_path, error = %err, "skipping unreadable entry");
                    discovery.issues.push(IngestIssue {
                        file_path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_log_path(path) {
                continue;
            }
            let file_path = path.to_string_lossy().to_string();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    tracing::debug!(path = %file_path, error = %err, "skipping file without metadata");
                    discovery.issues.push(IngestIssue {
                        file_path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            let mtime_ms = match metadata.modified() {
                Ok(time) => DateTime::<Utc>::from(time).timestamp_millis(),
                Err(err) => {
                    discovery.issues.push(IngestIssue {
                        file_path,
                        message: err.to_string(),
                    });
                    continue;
                }
            };
            discovery.files.push(FileRecord {
                session_id: session_id_from_path(&file_path),
                project_dir: project_dir_from_path(&root_str, &file_path),
                path: file_path,
                mtime_ms,
                size: metadata.len(),
            });
        }
        discovery
    }
}

/// Classify `discovered` against the cached manifest.
///
/// Every path in either input lands in exactly one bucket.
pub fn diff(discovered: &[FileRecord], cached: &HashMap<String, FileStamp>) -> DiffResult {
    let mut result = DiffResult::default();
    let mut seen = HashSet::with_capacity(discovered.len());
    for file in discovered {
        if !seen.insert(file.path.as_str()) {
            continue;
        }
        match cached.get(&file.path) {
            None => result.added.push(file.clone()),
            Some(stamp) if *stamp != file.stamp() => result.changed.push(file.clone()),
            Some(_) => result.unchanged.push(file.path.clone()),
        }
    }
    result.removed = cached
        .keys()
        .filter(|path| !seen.contains(path.as_str()))
        .cloned()
        .collect();
    result.removed.sort();
    result
}
