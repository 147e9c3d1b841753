use std::collections::HashMap;

use cost_core::{FileRecord, FileStamp};
use rusqlite::{OptionalExtension, params};

use crate::Db;
use crate::error::Result;
use crate::helpers::row_to_file_record;

impl Db {
    /// Path → (mtime, size) for every file in the manifest.
    pub fn cached_file_metadata(&self) -> Result<HashMap<String, FileStamp>> {
        let mut stmt = self
            .conn
            .prepare("SELECT file_path, mtime_ms, size FROM files")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                FileStamp {
                    mtime_ms: row.get(1)?,
                    size: row.get::<_, i64>(2)?.max(0) as u64,
                },
            ))
        })?;
        let mut cached = HashMap::new();
        for row in rows {
            let (path, stamp) = row?;
            cached.insert(path, stamp);
        }
        Ok(cached)
    }

    pub fn get_file(&self, path: &str) -> Result<Option<FileRecord>> {
        self.conn
            .query_row(
                r#"
                SELECT file_path, mtime_ms, size, session_id, project_dir
                FROM files
                WHERE file_path = ?1
                "#,
                params![path],
                row_to_file_record,
            )
            .optional()
            .map_err(crate::error::DbError::from)
    }

    pub fn count_files(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
        Ok(count)
    }
}
