//! Command surface for the mutation engine.
//!
//! One enum variant per user-facing operation, dispatched through `apply`
//! so the coordinator can log and persist every command the same way.

use crate::engine::mutation::{self, BoardDirection, TaskMove};
use crate::model::board::{Board, BoardCollection, TaskFields};
use crate::model::id::{BoardId, IdAllocator, ListId, TaskId};

/// A single committed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    CreateBoard {
        name: String,
    },
    DeleteBoard {
        board_id: BoardId,
    },
    ReorderBoard {
        board_id: BoardId,
        direction: BoardDirection,
    },
    ReplaceBoard {
        board: Board,
    },
    AddList {
        board_id: BoardId,
        title: String,
    },
    RenameList {
        board_id: BoardId,
        list_id: ListId,
        title: String,
    },
    DeleteList {
        board_id: BoardId,
        list_id: ListId,
    },
    AddTask {
        board_id: BoardId,
        list_id: ListId,
        fields: TaskFields,
    },
    DeleteTask {
        board_id: BoardId,
        list_id: ListId,
        task_id: TaskId,
    },
    UpdateTask {
        board_id: BoardId,
        list_id: ListId,
        task_id: TaskId,
        fields: TaskFields,
    },
    ToggleChecklistItem {
        board_id: BoardId,
        list_id: ListId,
        task_id: TaskId,
        item_index: usize,
    },
    MoveTask {
        board_id: BoardId,
        movement: TaskMove,
    },
}

impl BoardCommand {
    /// Stable snake_case name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateBoard { .. } => "create_board",
            Self::DeleteBoard { .. } => "delete_board",
            Self::ReorderBoard { .. } => "reorder_board",
            Self::ReplaceBoard { .. } => "replace_board",
            Self::AddList { .. } => "add_list",
            Self::RenameList { .. } => "rename_list",
            Self::DeleteList { .. } => "delete_list",
            Self::AddTask { .. } => "add_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::UpdateTask { .. } => "update_task",
            Self::ToggleChecklistItem { .. } => "toggle_checklist_item",
            Self::MoveTask { .. } => "move_task",
        }
    }

    /// Board the command targets, if it targets an existing one.
    pub fn board_id(&self) -> Option<&BoardId> {
        match self {
            Self::CreateBoard { .. } => None,
            Self::ReplaceBoard { board } => Some(&board.id),
            Self::DeleteBoard { board_id }
            | Self::ReorderBoard { board_id, .. }
            | Self::AddList { board_id, .. }
            | Self::RenameList { board_id, .. }
            | Self::DeleteList { board_id, .. }
            | Self::AddTask { board_id, .. }
            | Self::DeleteTask { board_id, .. }
            | Self::UpdateTask { board_id, .. }
            | Self::ToggleChecklistItem { board_id, .. }
            | Self::MoveTask { board_id, .. } => Some(board_id),
        }
    }

    /// Whether the command changes task positions inside a list.
    ///
    /// Such commands must not be issued against a filtered view.
    pub fn reorders_tasks(&self) -> bool {
        matches!(self, Self::MoveTask { .. })
    }
}

/// Applies `command` to `boards` and returns the resulting snapshot.
pub fn apply(
    boards: &BoardCollection,
    command: BoardCommand,
    ids: &mut dyn IdAllocator,
) -> BoardCollection {
    match command {
        BoardCommand::CreateBoard { name } => mutation::create_board(boards, &name, ids),
        BoardCommand::DeleteBoard { board_id } => mutation::delete_board(boards, &board_id),
        BoardCommand::ReorderBoard {
            board_id,
            direction,
        } => mutation::reorder_board(boards, &board_id, direction),
        BoardCommand::ReplaceBoard { board } => mutation::replace_board(boards, board),
        BoardCommand::AddList { board_id, title } => {
            mutation::add_list(boards, &board_id, &title, ids)
        }
        BoardCommand::RenameList {
            board_id,
            list_id,
            title,
        } => mutation::rename_list(boards, &board_id, &list_id, &title),
        BoardCommand::DeleteList { board_id, list_id } => {
            mutation::delete_list(boards, &board_id, &list_id)
        }
        BoardCommand::AddTask {
            board_id,
            list_id,
            fields,
        } => mutation::add_task(boards, &board_id, &list_id, fields, ids),
        BoardCommand::DeleteTask {
            board_id,
            list_id,
            task_id,
        } => mutation::delete_task(boards, &board_id, &list_id, &task_id),
        BoardCommand::UpdateTask {
            board_id,
            list_id,
            task_id,
            fields,
        } => mutation::update_task(boards, &board_id, &list_id, &task_id, fields),
        BoardCommand::ToggleChecklistItem {
            board_id,
            list_id,
            task_id,
            item_index,
        } => mutation::toggle_checklist_item(boards, &board_id, &list_id, &task_id, item_index),
        BoardCommand::MoveTask { board_id, movement } => {
            mutation::move_task(boards, &board_id, &movement)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, BoardCommand};
    use crate::model::board::BoardCollection;
    use crate::model::id::SequentialAllocator;

    #[test]
    fn apply_dispatches_create_and_delete() {
        let mut ids = SequentialAllocator::new();
        let created = apply(
            &BoardCollection::default(),
            BoardCommand::CreateBoard {
                name: "Home".to_string(),
            },
            &mut ids,
        );
        assert_eq!(created.len(), 1);

        let board_id = created.boards()[0].id.clone();
        let deleted = apply(&created, BoardCommand::DeleteBoard { board_id }, &mut ids);
        assert!(deleted.is_empty());
    }

    #[test]
    fn only_move_task_counts_as_task_reorder() {
        let create = BoardCommand::CreateBoard {
            name: "x".to_string(),
        };
        assert!(!create.reorders_tasks());
        assert_eq!(create.name(), "create_board");
        assert!(create.board_id().is_none());
    }
}
