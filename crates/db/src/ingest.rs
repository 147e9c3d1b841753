use std::collections::HashSet;

use cost_core::{FileRecord, UsageRecord};
use rusqlite::params;

use crate::Db;
use crate::error::{DbError, Result};
use crate::helpers::row_to_usage_record;
use crate::types::WriteStats;

impl Db {
    /// Replace the cached state of `files` with `records` and drop `removed_paths`,
    /// all in one transaction.
    ///
    /// Every record must belong to one of `files`. Any failure rolls the whole
    /// write back and leaves the previously committed state untouched.
    pub fn write_results(
        &mut self,
        files: &[FileRecord],
        records: &[UsageRecord],
        removed_paths: &[String],
    ) -> Result<WriteStats> {
        let written: HashSet<&str> = files.iter().map(|file| file.path.as_str()).collect();
        if let Some(orphan) = records
            .iter()
            .find(|record| !written.contains(record.file_path.as_str()))
        {
            return Err(DbError::OrphanUsage(orphan.file_path.clone()));
        }

        let mut stats = WriteStats::default();
        let tx = self.conn.transaction()?;
        {
            let mut delete_file = tx.prepare("DELETE FROM files WHERE file_path = ?1")?;
            let mut delete_usage = tx.prepare("DELETE FROM usage WHERE file_path = ?1")?;
            for path in removed_paths {
                stats.files_removed += delete_file.execute(params![path])?;
                delete_usage.execute(params![path])?;
            }
            for file in files {
                delete_file.execute(params![file.path])?;
                delete_usage.execute(params![file.path])?;
            }

            let mut insert_file = tx.prepare(
                r#"
                INSERT INTO files (file_path, mtime_ms, size, session_id, project_dir)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )?;
            for file in files {
                insert_file.execute(params![
                    file.path,
                    file.mtime_ms,
                    file.size as i64,
                    file.session_id,
                    file.project_dir,
                ])?;
                stats.files_written += 1;
            }

            let mut insert_usage = tx.prepare(
                r#"
                INSERT INTO usage (
                  file_path, date, model, session_id, project_dir,
                  input_tokens, output_tokens, cache_creation_input_tokens,
                  cache_read_input_tokens, message_count
                ) VALUES (
                  ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10
                )
                "#,
            )?;
            for record in records {
                insert_usage.execute(params![
                    record.file_path,
                    record.date,
                    record.model,
                    record.session_id,
                    record.project_dir,
                    record.tokens.input_tokens as i64,
                    record.tokens.output_tokens as i64,
                    record.tokens.cache_creation_input_tokens as i64,
                    record.tokens.cache_read_input_tokens as i64,
                    record.message_count as i64,
                ])?;
                stats.usage_rows_written += 1;
            }
        }
        tx.commit()?;
        tracing::debug!(
            removed = stats.files_removed,
            files = stats.files_written,
            usage_rows = stats.usage_rows_written,
            "cache write committed"
        );
        Ok(stats)
    }

    /// Empty the manifest and every usage row.
    pub fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM usage", [])?;
        tx.execute("DELETE FROM files", [])?;
        tx.commit()?;
        Ok(())
    }

    pub fn usage_for_file(&self, path: &str) -> Result<Vec<UsageRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT file_path, date, model, session_id, project_dir,
                   input_tokens, output_tokens, cache_creation_input_tokens,
                   cache_read_input_tokens, message_count
            FROM usage
            WHERE file_path = ?1
            ORDER BY date ASC, model ASC
            "#,
        )?;
        let rows = stmt
            .query_map(params![path], row_to_usage_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn count_usage_rows(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage", [], |row| row.get(0))?;
        Ok(count)
    }
}
