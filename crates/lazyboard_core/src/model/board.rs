//! Board hierarchy types and read-only navigation.
//!
//! # Responsibility
//! - Define `Board`, `BoardList`, `Task` and `ChecklistItem` with their wire
//!   shape.
//! - Expose lookups that return `None` instead of placeholder values.
//! - Check collection-wide id uniqueness.
//!
//! # Invariants
//! - A task is owned by exactly one list, a list by exactly one board.
//! - `BoardCollection` is only changed by the mutation engine, which always
//!   produces a new value.
//!
//! # See also
//! - crate::engine

use crate::model::id::{BoardId, ListId, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Titles of the lists every new board starts with, in display order.
pub const DEFAULT_LIST_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// Task label shown as a colored badge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskLabel {
    #[default]
    None,
    Urgent,
    Review,
    Feature,
}

impl TaskLabel {
    /// Wire value, also used as search text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Urgent => "urgent",
            Self::Review => "review",
            Self::Feature => "feature",
        }
    }

    /// Parses a wire value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Some(Self::None),
            "urgent" => Some(Self::Urgent),
            "review" => Some(Self::Review),
            "feature" => Some(Self::Feature),
            _ => None,
        }
    }
}

/// One sub-task line of a task checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    /// Creates an unchecked item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Unit of work inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub label: TaskLabel,
    /// Serialized as `dueDate`; `""` on the wire means no date.
    #[serde(default, rename = "dueDate", with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

impl Task {
    /// Builds a task from editable fields under an already allocated id.
    pub fn from_fields(id: TaskId, fields: TaskFields) -> Self {
        let TaskFields {
            title,
            description,
            label,
            due_date,
            checklist,
        } = fields;
        Self {
            id,
            title,
            description,
            label,
            due_date,
            checklist,
        }
    }

    /// Returns the editable fields of this task.
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            label: self.label,
            due_date: self.due_date,
            checklist: self.checklist.clone(),
        }
    }

    /// Returns `(done, total)` checklist counts.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.done).count();
        (done, self.checklist.len())
    }
}

/// Editable task fields, used for create and full-replace updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    /// Required; blank titles turn the command into a no-op.
    pub title: String,
    pub description: String,
    pub label: TaskLabel,
    pub due_date: Option<NaiveDate>,
    pub checklist: Vec<ChecklistItem>,
}

impl TaskFields {
    /// Fields with only a title set, everything else defaulted.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Ordered column of tasks inside a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl BoardList {
    /// Creates an empty list.
    pub fn new(id: ListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == task_id)
    }

    pub fn task_index(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == task_id)
    }

    pub(crate) fn find_task_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == task_id)
    }
}

/// Top-level container of lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub lists: Vec<BoardList>,
}

impl Board {
    pub fn find_list(&self, list_id: &ListId) -> Option<&BoardList> {
        self.lists.iter().find(|list| &list.id == list_id)
    }

    pub fn list_index(&self, list_id: &ListId) -> Option<usize> {
        self.lists.iter().position(|list| &list.id == list_id)
    }

    /// Finds which list holds `task_id` and at which position.
    pub fn locate_task(&self, task_id: &TaskId) -> Option<(&ListId, usize)> {
        self.lists.iter().find_map(|list| {
            list.task_index(task_id)
                .map(|task_index| (&list.id, task_index))
        })
    }

    /// Total number of tasks across all lists.
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|list| list.tasks.len()).sum()
    }

    pub(crate) fn find_list_mut(&mut self, list_id: &ListId) -> Option<&mut BoardList> {
        self.lists.iter_mut().find(|list| &list.id == list_id)
    }
}

/// Structural problems that make a collection unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// An id is blank after trim.
    EmptyId(&'static str),
    DuplicateBoardId(BoardId),
    DuplicateListId(ListId),
    DuplicateTaskId(TaskId),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId(kind) => write!(f, "{kind} id must not be blank"),
            Self::DuplicateBoardId(id) => write!(f, "duplicate board id: {id}"),
            Self::DuplicateListId(id) => write!(f, "duplicate list id: {id}"),
            Self::DuplicateTaskId(id) => write!(f, "duplicate task id: {id}"),
        }
    }
}

impl Error for ModelValidationError {}

/// The full, ordered collection of boards: one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardCollection {
    boards: Vec<Board>,
}

impl BoardCollection {
    pub fn new(boards: Vec<Board>) -> Self {
        Self { boards }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn find_board(&self, board_id: &BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| &board.id == board_id)
    }

    pub fn board_index(&self, board_id: &BoardId) -> Option<usize> {
        self.boards.iter().position(|board| &board.id == board_id)
    }

    pub fn find_list(&self, board_id: &BoardId, list_id: &ListId) -> Option<&BoardList> {
        self.find_board(board_id)?.find_list(list_id)
    }

    pub fn find_task(
        &self,
        board_id: &BoardId,
        list_id: &ListId,
        task_id: &TaskId,
    ) -> Option<&Task> {
        self.find_list(board_id, list_id)?.find_task(task_id)
    }

    /// Checks that every id is non-blank and unique within its kind.
    ///
    /// Only structure is checked; titles and dates are not validated.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        let mut board_ids = HashSet::new();
        let mut list_ids = HashSet::new();
        let mut task_ids = HashSet::new();

        for board in &self.boards {
            if board.id.as_str().trim().is_empty() {
                return Err(ModelValidationError::EmptyId("board"));
            }
            if !board_ids.insert(&board.id) {
                return Err(ModelValidationError::DuplicateBoardId(board.id.clone()));
            }
            for list in &board.lists {
                if list.id.as_str().trim().is_empty() {
                    return Err(ModelValidationError::EmptyId("list"));
                }
                if !list_ids.insert(&list.id) {
                    return Err(ModelValidationError::DuplicateListId(list.id.clone()));
                }
                for task in &list.tasks {
                    if task.id.as_str().trim().is_empty() {
                        return Err(ModelValidationError::EmptyId("task"));
                    }
                    if !task_ids.insert(&task.id) {
                        return Err(ModelValidationError::DuplicateTaskId(task.id.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    pub(crate) fn boards_mut(&mut self) -> &mut Vec<Board> {
        &mut self.boards
    }

    pub(crate) fn find_board_mut(&mut self, board_id: &BoardId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|board| &board.id == board_id)
    }
}

impl From<Vec<Board>> for BoardCollection {
    fn from(value: Vec<Board>) -> Self {
        Self::new(value)
    }
}

/// `dueDate` wire format: `"YYYY-MM-DD"`, with `""` or `null` for no date.
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.collect_str(&date.format(FORMAT)),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveDate::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(|err| de::Error::custom(format!("invalid dueDate `{text}`: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardCollection, ModelValidationError, Task, TaskLabel};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn label_parse_accepts_wire_values_case_insensitively() {
        assert_eq!(TaskLabel::parse(" Urgent "), Some(TaskLabel::Urgent));
        assert_eq!(TaskLabel::parse("REVIEW"), Some(TaskLabel::Review));
        assert_eq!(TaskLabel::parse(""), Some(TaskLabel::None));
        assert_eq!(TaskLabel::parse("later"), None);
        for label in [TaskLabel::None, TaskLabel::Feature] {
            assert_eq!(TaskLabel::parse(label.as_str()), Some(label));
        }
    }

    #[test]
    fn task_defaults_optional_fields_on_read() {
        let task: Task =
            serde_json::from_value(json!({ "id": "task-1", "title": "Ship" })).unwrap();
        assert_eq!(task.description, "");
        assert_eq!(task.label, TaskLabel::None);
        assert_eq!(task.due_date, None);
        assert!(task.checklist.is_empty());
    }

    #[test]
    fn due_date_uses_empty_string_for_absent_value() {
        let task: Task = serde_json::from_value(json!({
            "id": "task-1",
            "title": "Ship",
            "dueDate": "2024-01-05",
            "label": "urgent"
        }))
        .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 1, 5));

        let mut undated = task.clone();
        undated.due_date = None;
        let value = serde_json::to_value(&undated).unwrap();
        assert_eq!(value["dueDate"], "");
        assert_eq!(value["label"], "urgent");
    }

    #[test]
    fn due_date_rejects_garbage() {
        let err = serde_json::from_value::<Task>(json!({
            "id": "task-1",
            "title": "Ship",
            "dueDate": "next tuesday"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid dueDate"));
    }

    #[test]
    fn validate_rejects_task_id_shared_between_boards() {
        let boards: BoardCollection = serde_json::from_value(json!([
            { "id": "b1", "name": "A", "lists": [
                { "id": "l1", "title": "x", "tasks": [{ "id": "t1", "title": "a" }] }
            ]},
            { "id": "b2", "name": "B", "lists": [
                { "id": "l2", "title": "y", "tasks": [{ "id": "t1", "title": "b" }] }
            ]}
        ]))
        .unwrap();

        assert_eq!(
            boards.validate(),
            Err(ModelValidationError::DuplicateTaskId("t1".into()))
        );
    }

    #[test]
    fn checklist_progress_counts_done_items() {
        let task: Task = serde_json::from_value(json!({
            "id": "t",
            "title": "x",
            "checklist": [{ "text": "a", "done": true }, { "text": "b" }]
        }))
        .unwrap();
        assert_eq!(task.checklist_progress(), (1, 2));
    }
}
