//! Pure mutation operations over a board collection snapshot.
//!
//! # Responsibility
//! - Apply one structural change and return the resulting snapshot.
//!
//! # Invariants
//! - Input snapshots are never modified; every call returns a new value.
//! - Unknown ids, blank names and out-of-range checklist indices leave the
//!   snapshot unchanged.
//! - A moved task is removed from its source before it is inserted, so it is
//!   never duplicated or dropped.

use crate::model::board::{
    Board, BoardCollection, BoardList, Task, TaskFields, DEFAULT_LIST_TITLES,
};
use crate::model::id::{BoardId, IdAllocator, ListId, TaskId};

/// Direction for swapping a board with its neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardDirection {
    Left,
    Right,
}

/// A committed drop: task at `source_index` of `source_list` goes to
/// `dest_index` of `dest_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub source_list: ListId,
    pub source_index: usize,
    pub dest_list: ListId,
    pub dest_index: usize,
}

impl TaskMove {
    /// Whether this move would put the task back where it started.
    pub fn is_identity(&self) -> bool {
        self.source_list == self.dest_list && self.source_index == self.dest_index
    }
}

/// Appends a board named `name` with the default lists.
pub fn create_board(
    boards: &BoardCollection,
    name: &str,
    ids: &mut dyn IdAllocator,
) -> BoardCollection {
    let mut next = boards.clone();
    let Some(name) = normalize_title(name) else {
        return next;
    };

    let board_id = ids.board_id();
    let lists = DEFAULT_LIST_TITLES
        .iter()
        .map(|title| BoardList::new(ids.list_id(), *title))
        .collect();
    next.boards_mut().push(Board {
        id: board_id,
        name,
        lists,
    });
    next
}

/// Removes a board together with everything it owns.
pub fn delete_board(boards: &BoardCollection, board_id: &BoardId) -> BoardCollection {
    let mut next = boards.clone();
    next.boards_mut().retain(|board| &board.id != board_id);
    next
}

/// Swaps a board with its neighbor; no wraparound.
pub fn reorder_board(
    boards: &BoardCollection,
    board_id: &BoardId,
    direction: BoardDirection,
) -> BoardCollection {
    let mut next = boards.clone();
    let Some(index) = next.board_index(board_id) else {
        return next;
    };
    let neighbor = match direction {
        BoardDirection::Left => index.checked_sub(1),
        BoardDirection::Right => Some(index + 1).filter(|swap| *swap < next.len()),
    };
    if let Some(neighbor) = neighbor {
        next.boards_mut().swap(index, neighbor);
    }
    next
}

/// Overwrites the board with the same id, keeping its position.
///
/// A replacement that would leave a blank or duplicate id anywhere in the
/// collection is ignored.
pub fn replace_board(boards: &BoardCollection, board: Board) -> BoardCollection {
    let mut next = boards.clone();
    let Some(slot) = next.find_board_mut(&board.id) else {
        return next;
    };
    *slot = board;
    if next.validate().is_err() {
        return boards.clone();
    }
    next
}

/// Appends an empty list to a board.
pub fn add_list(
    boards: &BoardCollection,
    board_id: &BoardId,
    title: &str,
    ids: &mut dyn IdAllocator,
) -> BoardCollection {
    let Some(title) = normalize_title(title) else {
        return boards.clone();
    };
    edit_board(boards, board_id, |board| {
        board.lists.push(BoardList::new(ids.list_id(), title));
    })
}

pub fn rename_list(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    title: &str,
) -> BoardCollection {
    let Some(title) = normalize_title(title) else {
        return boards.clone();
    };
    edit_list(boards, board_id, list_id, |list| list.title = title)
}

/// Removes a list and its tasks.
pub fn delete_list(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
) -> BoardCollection {
    edit_board(boards, board_id, |board| {
        board.lists.retain(|list| &list.id != list_id);
    })
}

/// Appends a task with a freshly allocated id.
pub fn add_task(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    fields: TaskFields,
    ids: &mut dyn IdAllocator,
) -> BoardCollection {
    let Some(fields) = normalize_fields(fields) else {
        return boards.clone();
    };
    edit_list(boards, board_id, list_id, |list| {
        list.tasks.push(Task::from_fields(ids.task_id(), fields));
    })
}

pub fn delete_task(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    task_id: &TaskId,
) -> BoardCollection {
    edit_list(boards, board_id, list_id, |list| {
        list.tasks.retain(|task| &task.id != task_id);
    })
}

/// Replaces every editable field of a task, keeping its id and position.
pub fn update_task(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    task_id: &TaskId,
    fields: TaskFields,
) -> BoardCollection {
    let Some(fields) = normalize_fields(fields) else {
        return boards.clone();
    };
    edit_task(boards, board_id, list_id, task_id, |task| {
        *task = Task::from_fields(task.id.clone(), fields);
    })
}

/// Flips `done` on one checklist entry.
pub fn toggle_checklist_item(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    task_id: &TaskId,
    item_index: usize,
) -> BoardCollection {
    edit_task(boards, board_id, list_id, task_id, |task| {
        if let Some(item) = task.checklist.get_mut(item_index) {
            item.done = !item.done;
        }
    })
}

/// Moves one task within a board, across lists or inside one list.
///
/// The task is removed first; `dest_index` then addresses the shortened
/// destination. Both indices clamp to the nearest valid bound.
pub fn move_task(
    boards: &BoardCollection,
    board_id: &BoardId,
    movement: &TaskMove,
) -> BoardCollection {
    if movement.is_identity() {
        return boards.clone();
    }
    edit_board(boards, board_id, |board| {
        let (Some(source), Some(dest)) = (
            board.list_index(&movement.source_list),
            board.list_index(&movement.dest_list),
        ) else {
            return;
        };

        let source_tasks = &mut board.lists[source].tasks;
        let Some(last) = source_tasks.len().checked_sub(1) else {
            return;
        };
        let task = source_tasks.remove(movement.source_index.min(last));

        let dest_tasks = &mut board.lists[dest].tasks;
        let at = movement.dest_index.min(dest_tasks.len());
        dest_tasks.insert(at, task);
    })
}

fn edit_board(
    boards: &BoardCollection,
    board_id: &BoardId,
    edit: impl FnOnce(&mut Board),
) -> BoardCollection {
    let mut next = boards.clone();
    if let Some(board) = next.find_board_mut(board_id) {
        edit(board);
    }
    next
}

fn edit_list(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    edit: impl FnOnce(&mut BoardList),
) -> BoardCollection {
    edit_board(boards, board_id, |board| {
        if let Some(list) = board.find_list_mut(list_id) {
            edit(list);
        }
    })
}

fn edit_task(
    boards: &BoardCollection,
    board_id: &BoardId,
    list_id: &ListId,
    task_id: &TaskId,
    edit: impl FnOnce(&mut Task),
) -> BoardCollection {
    edit_list(boards, board_id, list_id, |list| {
        if let Some(task) = list.find_task_mut(task_id) {
            edit(task);
        }
    })
}

fn normalize_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

fn normalize_fields(fields: TaskFields) -> Option<TaskFields> {
    let title = normalize_title(&fields.title)?;
    Some(TaskFields { title, ..fields })
}
