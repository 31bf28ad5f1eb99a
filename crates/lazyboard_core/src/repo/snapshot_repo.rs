//! Snapshot repository contracts and implementations.
//!
//! # Responsibility
//! - Load and save the whole board collection as one serialized snapshot.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `load` never fails: missing, unreadable or malformed data yields `None`
//!   and is logged.
//! - `save` replaces the stored snapshot atomically; partial writes are never
//!   observable.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::interchange::{parse_snapshot, to_snapshot_json, ExportError};
use crate::model::board::BoardCollection;
use log::{error, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the single snapshot row.
pub const DEFAULT_SNAPSHOT_KEY: &str = "boards";

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from snapshot persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Collection could not be serialized.
    Encode(ExportError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot store needs schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ExportError> for RepoError {
    fn from(value: ExportError) -> Self {
        Self::Encode(value)
    }
}

/// Load/save pair over a serialized board collection.
pub trait SnapshotRepository {
    /// Returns the stored collection, or `None` if absent or unreadable.
    fn load(&self) -> Option<BoardCollection>;
    /// Durably stores the full collection.
    fn save(&self, boards: &BoardCollection) -> RepoResult<()>;
}

impl<R: SnapshotRepository + ?Sized> SnapshotRepository for &R {
    fn load(&self) -> Option<BoardCollection> {
        (**self).load()
    }

    fn save(&self, boards: &BoardCollection) -> RepoResult<()> {
        (**self).save(boards)
    }
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
    key: String,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates a repository over a migrated connection using the default key.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Self::with_key(conn, DEFAULT_SNAPSHOT_KEY)
    }

    /// Creates a repository that reads and writes the row named `key`.
    pub fn with_key(conn: &'conn Connection, key: impl Into<String>) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self {
            conn,
            key: key.into(),
        })
    }

    fn read_payload(&self) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload
                 FROM board_snapshots
                 WHERE snapshot_key = ?1;",
                [self.key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load(&self) -> Option<BoardCollection> {
        let payload = match self.read_payload() {
            Ok(payload) => payload?,
            Err(err) => {
                error!("event=snapshot_load module=repo status=error backend=sqlite error={err}");
                return None;
            }
        };
        decode_payload(&payload, "sqlite")
    }

    fn save(&self, boards: &BoardCollection) -> RepoResult<()> {
        let payload = to_snapshot_json(boards)?;
        self.conn.execute(
            "INSERT INTO board_snapshots (snapshot_key, payload)
             VALUES (?1, ?2)
             ON CONFLICT(snapshot_key) DO UPDATE
             SET payload = excluded.payload,
                 updated_at = (strftime('%s', 'now') * 1000);",
            params![self.key.as_str(), payload],
        )?;
        Ok(())
    }
}

/// In-process repository holding the serialized snapshot in memory.
///
/// Stores text rather than the value so loads go through the same decoding
/// path as persisted data.
#[derive(Debug, Default)]
pub struct MemorySnapshotRepository {
    payload: RefCell<Option<String>>,
}

impl MemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with raw stored text, e.g. to simulate corrupted storage.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RefCell::new(Some(payload.into())),
        }
    }

    /// Currently stored text, if any.
    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }
}

impl SnapshotRepository for MemorySnapshotRepository {
    fn load(&self) -> Option<BoardCollection> {
        let payload = self.payload.borrow();
        decode_payload(payload.as_deref()?, "memory")
    }

    fn save(&self, boards: &BoardCollection) -> RepoResult<()> {
        let payload = to_snapshot_json(boards)?;
        *self.payload.borrow_mut() = Some(payload);
        Ok(())
    }
}

fn decode_payload(payload: &str, backend: &'static str) -> Option<BoardCollection> {
    match parse_snapshot(payload) {
        Ok(boards) => Some(boards),
        Err(err) => {
            warn!(
                "event=snapshot_load module=repo status=error backend={backend} \
                 error_code=malformed_snapshot error={err}"
            );
            None
        }
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{MemorySnapshotRepository, SnapshotRepository};
    use crate::model::board::BoardCollection;

    #[test]
    fn memory_repo_starts_empty() {
        assert!(MemorySnapshotRepository::new().load().is_none());
    }

    #[test]
    fn memory_repo_treats_malformed_payload_as_absent() {
        let repo = MemorySnapshotRepository::with_payload("{oops");
        assert!(repo.load().is_none());
    }

    #[test]
    fn memory_repo_returns_saved_collection() {
        let repo = MemorySnapshotRepository::new();
        repo.save(&BoardCollection::default()).unwrap();
        assert_eq!(repo.payload().as_deref(), Some("[]"));
        assert_eq!(repo.load(), Some(BoardCollection::default()));
    }
}
