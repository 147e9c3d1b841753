#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("usage rows for {0} have no matching file record")]
    OrphanUsage(String),
}

pub type Result<T> = std::result::Result<T, DbError>;
