mod parser;
mod paths;
mod pipeline;
mod scanner;
mod types;

pub use parser::{LogParser, ParseOutcome, SYNTHETIC_MODEL};
pub use paths::default_projects_dir;
pub use pipeline::run_ingestion;
pub use scanner::{Discovery, FileScanner, diff};
pub use types::{IngestError, IngestIssue, IngestReport, Result};
