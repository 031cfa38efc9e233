//! Pure projections over the canonical task list. Nothing here mutates
//! state; everything is recomputed from the list and the filter inputs.

use std::collections::BTreeMap;

use gorev_api::Todo;

use super::state::StatusFilter;
use super::tasks::TaskList;

/// Status filter plus case-folded substring search over titles.
pub fn visible_tasks<'a>(
    tasks: &'a TaskList,
    filter: StatusFilter,
    query: &str,
) -> Vec<&'a Todo> {
    let needle = query.trim().to_lowercase();

    tasks
        .iter()
        .filter(|t| {
            filter.admits(t.completed)
                && (needle.is_empty() || t.title.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Restrict a filtered set to one due date, when a calendar day is
/// selected.
pub fn narrow_by_day<'a>(tasks: Vec<&'a Todo>, selected: Option<&str>) -> Vec<&'a Todo> {
    match selected {
        None => tasks,
        Some(day) => tasks
            .into_iter()
            .filter(|t| t.due_date.as_deref() == Some(day))
            .collect(),
    }
}

/// How many tasks are due on each day. Tasks without a due date do not
/// appear.
pub fn due_counts(tasks: &TaskList) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for todo in tasks.iter() {
        if let Some(due) = &todo.due_date {
            *counts.entry(due.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// A task is overdue when it is open and its due date is strictly
/// before today. ISO `YYYY-MM-DD` strings order lexicographically by
/// calendar date, so a plain string comparison is exact.
pub fn is_overdue(todo: &Todo, today: &str) -> bool {
    match &todo.due_date {
        Some(due) => !todo.completed && due.as_str() < today,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, title: &str, completed: bool, due: Option<&str>) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed,
            due_date: due.map(str::to_string),
        }
    }

    fn sample() -> TaskList {
        let mut tasks = TaskList::default();
        tasks.replace_all(vec![
            todo(1, "Buy milk", false, Some("2024-03-10")),
            todo(2, "Water plants", true, Some("2024-03-10")),
            todo(3, "Call mom", false, None),
        ]);
        tasks
    }

    #[test]
    fn status_filter_splits_by_completed() {
        let tasks = sample();
        let all = visible_tasks(&tasks, StatusFilter::All, "");
        assert_eq!(all.len(), 3);
        let active = visible_tasks(&tasks, StatusFilter::Active, "");
        assert_eq!(active.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        let done = visible_tasks(&tasks, StatusFilter::Completed, "");
        assert_eq!(done.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn query_is_case_folded_and_trimmed() {
        let tasks = sample();
        let hits = visible_tasks(&tasks, StatusFilter::All, "  MILK ");
        assert_eq!(hits.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1]);
        assert!(visible_tasks(&tasks, StatusFilter::All, "zzz").is_empty());
    }

    #[test]
    fn day_narrowing_keeps_only_matching_due_dates() {
        let tasks = sample();
        let all = visible_tasks(&tasks, StatusFilter::All, "");
        let day = narrow_by_day(all, Some("2024-03-10"));
        assert_eq!(day.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn due_counts_excludes_dateless_tasks() {
        let counts = due_counts(&sample());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("2024-03-10"), Some(&2));
    }

    #[test]
    fn overdue_requires_open_and_past_due() {
        let past_open = todo(1, "t", false, Some("2024-03-01"));
        let past_done = todo(2, "t", true, Some("2024-03-01"));
        let future = todo(3, "t", false, Some("2024-03-20"));
        let dateless = todo(4, "t", false, None);

        assert!(is_overdue(&past_open, "2024-03-10"));
        assert!(!is_overdue(&past_done, "2024-03-10"));
        assert!(!is_overdue(&future, "2024-03-10"));
        assert!(!is_overdue(&dateless, "2024-03-10"));
    }
}
