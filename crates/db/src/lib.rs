mod analytics;
mod error;
mod files;
mod helpers;
mod ingest;
mod migrations;
mod types;

use std::path::Path;
use std::time::Duration;

use rusqlite::Connection;

pub use error::{DbError, Result};
pub use migrations::MIGRATIONS;
pub use types::WriteStats;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the usage cache database.
///
/// The connection closes when the handle is dropped; [`Db::close`] closes it
/// explicitly and reports errors.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "temp_store", "MEMORY")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| DbError::from(err))
    }
}
