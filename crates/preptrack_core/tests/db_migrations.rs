use preptrack_core::db::migrations::latest_version;
use preptrack_core::db::{open_db, open_db_in_memory, DbError};
use preptrack_core::{KeyValueStore, KvError, SqliteKvStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_file_database_keeps_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preptrack.db");

    let conn = open_db(&path).unwrap();
    SqliteKvStore::try_new(&conn)
        .unwrap()
        .save("greeting", "hello")
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteKvStore::try_new(&conn).unwrap();
    assert_eq!(store.load("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn kv_store_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        KvError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn save_overwrites_previous_value() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKvStore::try_new(&conn).unwrap();

    assert_eq!(store.load("k").unwrap(), None);
    store.save("k", "one").unwrap();
    store.save("k", "two").unwrap();
    assert_eq!(store.load("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}
