//! Identity types and allocation.
//!
//! # Responsibility
//! - Give boards, lists and tasks distinct id types.
//! - Allocate fresh ids that are never reused within a process.
//!
//! # Invariants
//! - Allocated ids carry their kind prefix (`board-`, `list-`, `task-`).
//! - An allocator never hands out the same id twice.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing id value, e.g. one read from an import file.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_id!(
    /// Stable board identifier.
    BoardId
);
define_id!(
    /// Stable list identifier, unique across all boards.
    ListId
);
define_id!(
    /// Stable task identifier, unique across all lists and boards.
    TaskId
);

/// Entity kind an id is allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Board,
    List,
    Task,
}

impl IdKind {
    /// Wire prefix used for ids of this kind.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Task => "task",
        }
    }
}

/// Source of fresh entity ids.
///
/// Implementations must never return an id twice for the lifetime of the
/// allocator, regardless of kind or of later deletions.
pub trait IdAllocator {
    /// Returns a new raw id for `kind`.
    fn new_id(&mut self, kind: IdKind) -> String;

    fn board_id(&mut self) -> BoardId {
        BoardId(self.new_id(IdKind::Board))
    }

    fn list_id(&mut self) -> ListId {
        ListId(self.new_id(IdKind::List))
    }

    fn task_id(&mut self) -> TaskId {
        TaskId(self.new_id(IdKind::Task))
    }
}

/// Default allocator backed by random UUIDv4 values.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn new_id(&mut self, kind: IdKind) -> String {
        format!("{}-{}", kind.prefix(), Uuid::new_v4())
    }
}

/// Deterministic counter-based allocator.
///
/// Ids look like `task-7`. Only safe when the collection it writes into was
/// also produced by this allocator, so it is meant for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct SequentialAllocator {
    next: u64,
}

impl SequentialAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for SequentialAllocator {
    fn new_id(&mut self, kind: IdKind) -> String {
        self.next += 1;
        format!("{}-{}", kind.prefix(), self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::{IdAllocator, IdKind, SequentialAllocator, TaskId, UuidAllocator};
    use std::collections::HashSet;

    #[test]
    fn uuid_allocator_prefixes_and_never_repeats() {
        let mut ids = UuidAllocator;
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let id = ids.new_id(IdKind::Task);
            assert!(id.starts_with("task-"));
            assert!(seen.insert(id));
        }
        assert!(ids.board_id().as_str().starts_with("board-"));
    }

    #[test]
    fn sequential_allocator_shares_counter_across_kinds() {
        let mut ids = SequentialAllocator::new();
        assert_eq!(ids.board_id().as_str(), "board-1");
        assert_eq!(ids.list_id().as_str(), "list-2");
        assert_eq!(ids.task_id(), TaskId::from("task-3"));
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&TaskId::from("task-9")).unwrap();
        assert_eq!(json, "\"task-9\"");
    }
}
