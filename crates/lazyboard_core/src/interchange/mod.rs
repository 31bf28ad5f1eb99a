//! JSON import/export of the full board collection.
//!
//! # Responsibility
//! - Parse snapshot text into a validated `BoardCollection`.
//! - Render the collection as the downloadable export artifact.
//!
//! # Invariants
//! - Import is all-or-nothing: a rejected document never yields a partial
//!   collection.
//! - Only a top-level JSON array is accepted.

mod snapshot_json;

pub use snapshot_json::{
    export_to_dir, import_from_path, parse_snapshot, to_export_json, to_snapshot_json,
    ExportError, ExportResult, ImportError, ImportResult, EXPORT_FILE_NAME,
};
