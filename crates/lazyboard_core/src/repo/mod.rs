//! Persistence gateway for board snapshots.
//!
//! # Responsibility
//! - Define the load/save contract used by the coordinator.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - The in-memory model stays authoritative; repositories only mirror it.

pub mod snapshot_repo;
