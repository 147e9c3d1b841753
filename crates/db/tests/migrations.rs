use cost_db::{Db, MIGRATIONS};
use rusqlite::Connection;

#[test]
fn migrate_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cache.db");

    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("first migrate");
    db.migrate().expect("second migrate");
    let applied = db.applied_migrations().expect("applied");
    let expected: Vec<String> = MIGRATIONS.iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(applied, expected);
    db.close().expect("close");

    let mut reopened = Db::open(&path).expect("reopen db");
    reopened.migrate().expect("migrate after reopen");
    assert_eq!(reopened.applied_migrations().expect("applied"), expected);
}

#[test]
fn open_enables_wal_and_creates_tables() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cache.db");
    let mut db = Db::open(&path).expect("open db");
    db.migrate().expect("migrate");

    let conn = Connection::open(&path).expect("open conn");
    let mode: String = conn
        .query_row("PRAGMA journal_mode", [], |row| row.get(0))
        .expect("journal mode");
    assert_eq!(mode.to_lowercase(), "wal");

    let tables: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect");
    assert!(tables.contains(&"files".to_string()));
    assert!(tables.contains(&"usage".to_string()));

    let indexes: Vec<String> = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'usage'")
        .expect("prepare")
        .query_map([], |row| row.get(0))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("collect");
    assert!(indexes.contains(&"idx_usage_date".to_string()));
    assert!(indexes.contains(&"idx_usage_project_date".to_string()));
}
