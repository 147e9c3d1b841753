use ::ingest::{FileScanner, IngestReport};

use crate::error::Result;
use crate::services::SharedConfig;
use cost_db::Db;

#[derive(Clone)]
pub struct IngestService {
    config: SharedConfig,
}

impl IngestService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn scanner(&self) -> FileScanner {
        FileScanner::new(&self.config.paths.projects_dir)
    }

    pub fn run(&self, db: &mut Db, force_rebuild: bool) -> Result<IngestReport> {
        Ok(::ingest::run_ingestion(
            db,
            &self.scanner(),
            &self.config.parser,
            force_rebuild,
        )?)
    }
}
