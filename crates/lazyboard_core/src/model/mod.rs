//! Board domain model.
//!
//! # Responsibility
//! - Define the board → list → task → checklist hierarchy.
//! - Provide identity allocation and read-only navigation helpers.
//!
//! # Invariants
//! - Ids are unique within their kind across the whole collection.
//! - Sequence order is the only ranking signal; no rank field exists.
//! - Every container exclusively owns its children.

pub mod board;
pub mod id;
