#![allow(dead_code)]

use std::path::PathBuf;

use cost_core::{FileRecord, TokenCounts, UsageRecord, session_id_from_path};
use cost_db::Db;
use tempfile::TempDir;

pub struct TestDb {
    pub _dir: TempDir,
    pub db: Db,
    pub path: PathBuf,
}

pub fn setup_db() -> TestDb {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cache.db");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate db");
    TestDb {
        _dir: dir,
        db,
        path,
    }
}

pub fn make_file(path: &str, project_dir: &str) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        mtime_ms: 1_700_000_000_000,
        size: 1024,
        session_id: session_id_from_path(path),
        project_dir: project_dir.to_string(),
    }
}

pub fn tokens(input: u64, output: u64, cache_create: u64, cache_read: u64) -> TokenCounts {
    TokenCounts {
        input_tokens: input,
        output_tokens: output,
        cache_creation_input_tokens: cache_create,
        cache_read_input_tokens: cache_read,
    }
}

pub fn make_usage(file: &FileRecord, date: &str, model: &str, tokens: TokenCounts) -> UsageRecord {
    UsageRecord {
        file_path: file.path.clone(),
        date: date.to_string(),
        model: model.to_string(),
        session_id: file.session_id.clone(),
        project_dir: file.project_dir.clone(),
        tokens,
        message_count: 1,
    }
}
