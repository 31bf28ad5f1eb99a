//! Core domain logic for LazyBoard.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod engine;
pub mod interchange;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use engine::command::{apply, BoardCommand};
pub use engine::mutation::{BoardDirection, TaskMove};
pub use interchange::{ExportError, ImportError, EXPORT_FILE_NAME};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::board::{
    Board, BoardCollection, BoardList, ChecklistItem, ModelValidationError, Task, TaskFields,
    TaskLabel, DEFAULT_LIST_TITLES,
};
pub use model::id::{
    BoardId, IdAllocator, IdKind, ListId, SequentialAllocator, TaskId, UuidAllocator,
};
pub use repo::snapshot_repo::{
    MemorySnapshotRepository, RepoError, RepoResult, SnapshotRepository,
    SqliteSnapshotRepository,
};
pub use service::board_service::{BoardService, BoardServiceError, SaveStatus};
pub use service::task_editor::TaskDraft;
pub use view::projector::{project, project_board, reorder_allowed, ListProjection};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
