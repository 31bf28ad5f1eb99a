//! Use-case services.
//!
//! # Responsibility
//! - Coordinate engine, repository and projector calls for UI callers.
//! - Keep UI layers decoupled from storage details.

pub mod board_service;
pub mod task_editor;
