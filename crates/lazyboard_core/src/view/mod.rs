//! Read-only task projections for display.
//!
//! # Responsibility
//! - Filter and sort a list's tasks for rendering.
//!
//! # Invariants
//! - Projections never mutate the model.

pub mod projector;
