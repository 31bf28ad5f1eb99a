//! Board coordinator service.
//!
//! # Responsibility
//! - Own the live board snapshot and serialize all commands against it.
//! - Persist every committed snapshot through the repository.
//! - Serve projections and import/export to UI callers.
//!
//! # Invariants
//! - One command is applied and its save attempted before the next starts.
//! - Save failures are logged and never roll back the in-memory snapshot.
//! - Import replaces the whole collection or nothing.

use crate::engine::command::{apply, BoardCommand};
use crate::interchange::{
    export_to_dir, import_from_path, parse_snapshot, to_export_json, ExportResult, ImportResult,
};
use crate::model::board::{BoardCollection, Task};
use crate::model::id::{BoardId, IdAllocator, ListId, UuidAllocator};
use crate::repo::snapshot_repo::SnapshotRepository;
use crate::view::projector::{project, project_board, reorder_allowed, ListProjection};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors surfaced to UI callers by the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardServiceError {
    /// A task reorder was issued while a filter query is active.
    ReorderWhileFiltered,
}

impl Display for BoardServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReorderWhileFiltered => {
                write!(f, "tasks cannot be reordered while a filter is active")
            }
        }
    }
}

impl Error for BoardServiceError {}

/// Outcome of the most recent save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Nothing has been saved yet in this session.
    Idle,
    Saved,
    Failed,
}

/// Single owner of the live board collection.
pub struct BoardService<R: SnapshotRepository> {
    repo: R,
    ids: Box<dyn IdAllocator>,
    boards: BoardCollection,
    save_status: SaveStatus,
}

impl<R: SnapshotRepository> BoardService<R> {
    /// Loads the stored collection (or starts empty) with UUID ids.
    pub fn open(repo: R) -> Self {
        Self::with_allocator(repo, Box::new(UuidAllocator))
    }

    /// Loads the stored collection using a caller-provided allocator.
    pub fn with_allocator(repo: R, ids: Box<dyn IdAllocator>) -> Self {
        let boards = repo.load().unwrap_or_default();
        info!(
            "event=boards_load module=service status=ok boards={}",
            boards.len()
        );
        Self {
            repo,
            ids,
            boards,
            save_status: SaveStatus::Idle,
        }
    }

    /// Current snapshot.
    pub fn boards(&self) -> &BoardCollection {
        &self.boards
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    /// Applies one command, persists the result if it changed, and returns
    /// the new snapshot.
    pub fn execute(&mut self, command: BoardCommand) -> &BoardCollection {
        let name = command.name();
        let board_id = command
            .board_id()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());

        let next = apply(&self.boards, command, self.ids.as_mut());
        if next == self.boards {
            debug!(
                "event=board_command module=service status=skip command={name} board={board_id}"
            );
            return &self.boards;
        }

        info!(
            "event=board_command module=service status=ok command={name} board={board_id}"
        );
        self.commit(next);
        &self.boards
    }

    /// Like `execute`, but rejects task reorders while `query` filters the
    /// view.
    pub fn execute_in_view(
        &mut self,
        command: BoardCommand,
        query: &str,
    ) -> Result<&BoardCollection, BoardServiceError> {
        if command.reorders_tasks() && !reorder_allowed(query) {
            info!(
                "event=board_command module=service status=rejected command={} \
                 reason=filter_active",
                command.name()
            );
            return Err(BoardServiceError::ReorderWhileFiltered);
        }
        Ok(self.execute(command))
    }

    /// Replaces the whole collection with parsed import text.
    ///
    /// On error the current collection is left untouched.
    pub fn import_json(&mut self, text: &str) -> ImportResult<&BoardCollection> {
        let imported = parse_snapshot(text).inspect_err(|err| {
            info!("event=boards_import module=service status=error error={err}");
        })?;
        self.finish_import(imported);
        Ok(&self.boards)
    }

    /// Replaces the whole collection with the contents of an import file.
    pub fn import_from_path(&mut self, path: impl AsRef<Path>) -> ImportResult<&BoardCollection> {
        let imported = import_from_path(path).inspect_err(|err| {
            info!("event=boards_import module=service status=error error={err}");
        })?;
        self.finish_import(imported);
        Ok(&self.boards)
    }

    /// Pretty JSON of the full collection.
    pub fn export_json(&self) -> ExportResult<String> {
        to_export_json(&self.boards)
    }

    /// Writes the export artifact into `dir`.
    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> ExportResult<PathBuf> {
        let path = export_to_dir(dir, &self.boards)?;
        info!(
            "event=boards_export module=service status=ok boards={}",
            self.boards.len()
        );
        Ok(path)
    }

    /// Filtered, sorted tasks of one list; `None` if the list is unknown.
    pub fn project_list(
        &self,
        board_id: &BoardId,
        list_id: &ListId,
        query: &str,
    ) -> Option<Vec<&Task>> {
        self.boards
            .find_list(board_id, list_id)
            .map(|list| project(list, query))
    }

    /// Filtered, sorted tasks of every list in a board.
    pub fn project_board(
        &self,
        board_id: &BoardId,
        query: &str,
    ) -> Option<Vec<ListProjection<'_>>> {
        self.boards
            .find_board(board_id)
            .map(|board| project_board(board, query))
    }

    fn finish_import(&mut self, imported: BoardCollection) {
        info!(
            "event=boards_import module=service status=ok boards={}",
            imported.len()
        );
        self.commit(imported);
    }

    fn commit(&mut self, next: BoardCollection) {
        self.boards = next;
        self.save_status = match self.repo.save(&self.boards) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                error!(
                    "event=snapshot_save module=service status=error boards={} error={}",
                    self.boards.len(),
                    err
                );
                SaveStatus::Failed
            }
        };
    }
}
