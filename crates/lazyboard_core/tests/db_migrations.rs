use lazyboard_core::db::migrations::latest_version;
use lazyboard_core::db::{open_db, open_db_in_memory, DbError};
use lazyboard_core::{
    BoardCollection, BoardCommand, BoardService, RepoError, SnapshotRepository,
    SqliteSnapshotRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "board_snapshots");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazyboard.sqlite3");

    drop(open_db(&path).unwrap());
    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteSnapshotRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn sqlite_repository_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazyboard.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        assert!(repo.load().is_none());

        let mut service = BoardService::open(repo);
        service.execute(BoardCommand::CreateBoard {
            name: "Persisted".to_string(),
        });
        service.execute(BoardCommand::CreateBoard {
            name: "Second".to_string(),
        });
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let loaded = repo.load().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.boards()[0].name, "Persisted");
    assert_eq!(loaded.boards()[0].lists.len(), 3);
}

#[test]
fn corrupted_snapshot_row_loads_as_absent() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO board_snapshots (snapshot_key, payload) VALUES ('boards', '{\"x\":1}');",
        [],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    assert!(repo.load().is_none());

    repo.save(&BoardCollection::default()).unwrap();
    assert_eq!(repo.load(), Some(BoardCollection::default()));
}

#[test]
fn snapshot_keys_are_isolated() {
    let conn = open_db_in_memory().unwrap();
    let primary = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let scratch = SqliteSnapshotRepository::with_key(&conn, "scratch").unwrap();

    primary.save(&BoardCollection::default()).unwrap();
    assert!(scratch.load().is_none());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "missing table {table_name}");
}
