//! Snapshot JSON codec.

use crate::model::board::{BoardCollection, ModelValidationError};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name used for exported collections.
pub const EXPORT_FILE_NAME: &str = "taskly-boards.json";

pub type ImportResult<T> = Result<T, ImportError>;
pub type ExportResult<T> = Result<T, ExportError>;

/// Reasons an import document is rejected.
#[derive(Debug)]
pub enum ImportError {
    /// Source file cannot be read.
    Io(std::io::Error),
    /// Text is not valid JSON.
    Parse(serde_json::Error),
    /// JSON is valid but the top level is not an array.
    NotAnArray,
    /// Array entries do not have the board shape.
    InvalidShape(serde_json::Error),
    /// Shape is fine but ids collide or are blank.
    Invalid(ModelValidationError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read import file: {err}"),
            Self::Parse(err) => write!(f, "could not parse JSON: {err}"),
            Self::NotAnArray => write!(f, "invalid file format: expected an array of boards"),
            Self::InvalidShape(err) => write!(f, "invalid board data: {err}"),
            Self::Invalid(err) => write!(f, "invalid board data: {err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::NotAnArray => None,
            Self::InvalidShape(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<ModelValidationError> for ImportError {
    fn from(value: ModelValidationError) -> Self {
        Self::Invalid(value)
    }
}

/// Failures while producing an export.
#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "could not serialize boards: {err}"),
            Self::Io { path, source } => {
                write!(f, "could not write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Parses and validates snapshot text.
pub fn parse_snapshot(text: &str) -> ImportResult<BoardCollection> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    let boards: BoardCollection =
        serde_json::from_value(value).map_err(ImportError::InvalidShape)?;
    boards.validate()?;
    Ok(boards)
}

/// Reads and parses an import file.
pub fn import_from_path(path: impl AsRef<Path>) -> ImportResult<BoardCollection> {
    let text = std::fs::read_to_string(path).map_err(ImportError::Io)?;
    parse_snapshot(&text)
}

/// Compact form used for storage.
pub fn to_snapshot_json(boards: &BoardCollection) -> ExportResult<String> {
    Ok(serde_json::to_string(boards)?)
}

/// Pretty-printed form used for the export artifact.
pub fn to_export_json(boards: &BoardCollection) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(boards)?)
}

/// Writes `EXPORT_FILE_NAME` into `dir` and returns the written path.
pub fn export_to_dir(dir: impl AsRef<Path>, boards: &BoardCollection) -> ExportResult<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    let body = to_export_json(boards)?;
    std::fs::write(&path, body).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{parse_snapshot, to_export_json, ImportError};

    #[test]
    fn object_document_is_rejected_as_not_an_array() {
        let err = parse_snapshot(r#"{"not":"array"}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray));
        assert!(err.to_string().contains("expected an array"));
    }

    #[test]
    fn broken_text_is_a_parse_error() {
        assert!(matches!(
            parse_snapshot("[{").unwrap_err(),
            ImportError::Parse(_)
        ));
    }

    #[test]
    fn board_without_name_is_a_shape_error() {
        assert!(matches!(
            parse_snapshot(r#"[{"id":"b1","lists":[]}]"#).unwrap_err(),
            ImportError::InvalidShape(_)
        ));
    }

    #[test]
    fn empty_array_round_trips_through_export() {
        let boards = parse_snapshot("[]").unwrap();
        assert!(boards.is_empty());
        assert_eq!(to_export_json(&boards).unwrap(), "[]");
    }
}
