//! Query filtering and due-date ordering of tasks.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test against
//!   `"{title} {description} {label}"`; a blank query matches everything.
//! - Sorting is stable: dated tasks ascending, undated tasks last, ties keep
//!   list order.

use crate::model::board::{Board, BoardList, Task};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Visible tasks of one list under a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProjection<'a> {
    pub list: &'a BoardList,
    pub tasks: Vec<&'a Task>,
}

/// Projects one list under `query`.
pub fn project<'a>(list: &'a BoardList, query: &str) -> Vec<&'a Task> {
    let needle = normalize_query(query);
    let mut visible: Vec<&Task> = list
        .tasks
        .iter()
        .filter(|task| needle.as_deref().map_or(true, |n| task_matches(task, n)))
        .collect();
    visible.sort_by(|a, b| compare_due_dates(a.due_date, b.due_date));
    visible
}

/// Projects every list of a board under one shared query.
pub fn project_board<'a>(board: &'a Board, query: &str) -> Vec<ListProjection<'a>> {
    board
        .lists
        .iter()
        .map(|list| ListProjection {
            list,
            tasks: project(list, query),
        })
        .collect()
}

/// Whether task reordering is allowed while `query` is active.
///
/// Positions in a filtered view do not map to list positions.
pub fn reorder_allowed(query: &str) -> bool {
    normalize_query(query).is_none()
}

fn normalize_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

fn task_matches(task: &Task, needle: &str) -> bool {
    let haystack = format!(
        "{} {} {}",
        task.title,
        task.description,
        task.label.as_str()
    )
    .to_lowercase();
    haystack.contains(needle)
}

fn compare_due_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::{project, reorder_allowed};
    use crate::model::board::{BoardList, Task, TaskLabel};
    use crate::model::id::{ListId, TaskId};
    use chrono::NaiveDate;

    fn task(id: &str, title: &str, due: Option<(i32, u32, u32)>) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            description: String::new(),
            label: TaskLabel::None,
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            checklist: Vec::new(),
        }
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.id.to_string()).collect()
    }

    #[test]
    fn empty_query_sorts_by_due_date_with_undated_last() {
        let mut list = BoardList::new(ListId::from("l"), "L");
        list.tasks = vec![
            task("t1", "a", None),
            task("t2", "b", Some((2024, 3, 1))),
            task("t3", "c", None),
            task("t4", "d", Some((2024, 1, 5))),
            task("t5", "e", Some((2024, 3, 1))),
        ];

        assert_eq!(ids(&project(&list, "")), ["t4", "t2", "t5", "t1", "t3"]);
        assert_eq!(list.tasks[0].id.as_str(), "t1");
    }

    #[test]
    fn query_matches_label_case_insensitively() {
        let mut list = BoardList::new(ListId::from("l"), "L");
        let mut urgent = task("t1", "Fix login", None);
        urgent.label = TaskLabel::Urgent;
        list.tasks = vec![urgent, task("t2", "Write docs", None)];

        assert_eq!(ids(&project(&list, "URGENT")), ["t1"]);
        assert_eq!(ids(&project(&list, "  docs ")), ["t2"]);
        assert!(project(&list, "nothing").is_empty());
    }

    #[test]
    fn reorder_is_blocked_only_for_non_blank_queries() {
        assert!(reorder_allowed(""));
        assert!(reorder_allowed("   "));
        assert!(!reorder_allowed("x"));
    }
}
