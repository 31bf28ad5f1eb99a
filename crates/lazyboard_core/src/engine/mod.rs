//! Board mutation engine.
//!
//! # Responsibility
//! - Turn `(snapshot, command)` into a new invariant-preserving snapshot.
//! - Stay free of storage, logging and rendering concerns.
//!
//! # Invariants
//! - Every operation is total: malformed input yields the input snapshot.
//! - Id allocation is the only input besides the snapshot and arguments.

pub mod command;
pub mod mutation;
