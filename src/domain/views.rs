use super::enums::Filter;
use super::task::{PendingTask, Row, Task, TaskId};

/// Return a copy of `tasks` with `loading` set on every task whose id is in `ids`.
/// Other tasks are copied unchanged.
pub fn set_loading(tasks: &[Task], ids: &[TaskId], loading: bool) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if ids.contains(&task.id) {
                Task {
                    loading,
                    ..task.clone()
                }
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Tasks passing `filter`, in their original order
pub fn filter_tasks(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|task| filter.matches(task.completed)).collect()
}

/// Rows to render: the filtered tasks, then the placeholder (if any) regardless of filter
pub fn visible_rows<'a>(tasks: &'a [Task], filter: Filter, pending: Option<&'a PendingTask>) -> Vec<Row<'a>> {
    let mut rows: Vec<Row<'a>> = filter_tasks(tasks, filter).into_iter().map(Row::Confirmed).collect();
    if let Some(pending) = pending {
        rows.push(Row::Pending(pending));
    }
    rows
}

/// Number of incomplete tasks
pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.completed).count()
}

pub fn has_completed(tasks: &[Task]) -> bool {
    tasks.iter().any(|task| task.completed)
}

/// True exactly when no task is incomplete (vacuously true for an empty list)
pub fn all_completed(tasks: &[Task]) -> bool {
    active_count(tasks) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Task> {
        vec![
            Task::new(1, "write report", false, 1),
            Task::new(2, "call bank", true, 1),
            Task::new(3, "water plants", false, 1),
            Task::new(4, "pay rent", true, 1),
        ]
    }

    #[test]
    fn test_set_loading_marks_only_targets() {
        let tasks = sample();
        let marked = set_loading(&tasks, &[TaskId(2), TaskId(4)], true);

        assert!(!marked[0].loading);
        assert!(marked[1].loading);
        assert!(!marked[2].loading);
        assert!(marked[3].loading);
        assert_eq!(marked[0], tasks[0]);
        assert_eq!(marked[2], tasks[2]);
    }

    #[test]
    fn test_set_loading_inverse_restores() {
        let tasks = sample();
        let ids = [TaskId(1), TaskId(3), TaskId(99)];

        let restored = set_loading(&set_loading(&tasks, &ids, true), &ids, false);
        assert_eq!(restored, tasks);
    }

    #[test]
    fn test_set_loading_empty_ids_is_identity() {
        let tasks = sample();
        assert_eq!(set_loading(&tasks, &[], true), tasks);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let tasks = sample();
        let all: Vec<Task> = filter_tasks(&tasks, Filter::All).into_iter().cloned().collect();
        assert_eq!(all, tasks);
    }

    #[test]
    fn test_filter_active_and_completed_partition() {
        let tasks = sample();
        let active = filter_tasks(&tasks, Filter::Active);
        let completed = filter_tasks(&tasks, Filter::Completed);

        let active_ids: Vec<u64> = active.iter().map(|t| t.id.0).collect();
        let completed_ids: Vec<u64> = completed.iter().map(|t| t.id.0).collect();
        assert_eq!(active_ids, vec![1, 3]);
        assert_eq!(completed_ids, vec![2, 4]);
        assert_eq!(active.len() + completed.len(), tasks.len());
        assert!(active_ids.iter().all(|id| !completed_ids.contains(id)));
    }

    #[test]
    fn test_visible_rows_appends_pending_last() {
        let tasks = sample();
        let pending = PendingTask {
            title: "new one".to_string(),
        };

        let rows = visible_rows(&tasks, Filter::Completed, Some(&pending));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], Row::Pending(&pending));
    }

    #[test]
    fn test_counts() {
        let tasks = sample();
        assert_eq!(active_count(&tasks), 2);
        assert!(has_completed(&tasks));
        assert!(!all_completed(&tasks));

        let done: Vec<Task> = tasks
            .into_iter()
            .map(|t| Task { completed: true, ..t })
            .collect();
        assert!(all_completed(&done));
        assert!(all_completed(&[]));
        assert!(!has_completed(&[]));
    }
}
