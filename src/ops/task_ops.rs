use chrono::{DateTime, Utc};

use crate::model::task::{Task, TaskKey};

/// Error type for task operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task title cannot be empty")]
    EmptyTitle,
}

fn not_found(key: &TaskKey) -> TaskError {
    TaskError::NotFound(key.title.clone())
}

// ---------------------------------------------------------------------------
// Ordering and lookup
// ---------------------------------------------------------------------------

/// Incomplete tasks first, then by creation time. Stable, so tasks that
/// compare equal keep their relative order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}

/// Index of the task matching `key` exactly, if it still exists
pub fn resolve(key: &TaskKey, tasks: &[Task]) -> Option<usize> {
    tasks.iter().position(|t| key.matches(t))
}

/// Case-insensitive substring match on the title. An empty query matches all.
pub fn matches_query(task: &Task, query: &str) -> bool {
    query.is_empty() || task.title.to_lowercase().contains(&query.to_lowercase())
}

// ---------------------------------------------------------------------------
// Mutations: each leaves the list sorted. Ok means the day must be persisted.
// ---------------------------------------------------------------------------

/// Append a new incomplete task stamped `now`
pub fn create_task(
    tasks: &mut Vec<Task>,
    title: &str,
    now: DateTime<Utc>,
) -> Result<TaskKey, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    let task = Task::new(title, now);
    let key = task.key();
    tasks.push(task);
    sort_tasks(tasks);
    Ok(key)
}

/// Flip the completed flag; returns the new state
pub fn toggle_task(tasks: &mut [Task], key: &TaskKey) -> Result<bool, TaskError> {
    let idx = resolve(key, tasks).ok_or_else(|| not_found(key))?;
    let task = &mut tasks[idx];
    task.completed = !task.completed;
    let completed = task.completed;
    sort_tasks(tasks);
    Ok(completed)
}

/// Replace the title of the task matching `key`
pub fn edit_title(tasks: &mut [Task], key: &TaskKey, title: &str) -> Result<TaskKey, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    let idx = resolve(key, tasks).ok_or_else(|| not_found(key))?;
    tasks[idx].title = title.to_string();
    let new_key = tasks[idx].key();
    sort_tasks(tasks);
    Ok(new_key)
}

/// Remove the task matching `key`
pub fn delete_task(tasks: &mut Vec<Task>, key: &TaskKey) -> Result<Task, TaskError> {
    let idx = resolve(key, tasks).ok_or_else(|| not_found(key))?;
    let removed = tasks.remove(idx);
    sort_tasks(tasks);
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn task(title: &str, completed: bool, secs: i64) -> Task {
        Task {
            title: title.into(),
            completed,
            created_at: at(secs),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn sort_puts_incomplete_first_then_by_creation() {
        let mut tasks = vec![
            task("done-late", true, 30),
            task("open-late", false, 20),
            task("done-early", true, 5),
            task("open-early", false, 10),
        ];
        sort_tasks(&mut tasks);
        assert_eq!(
            titles(&tasks),
            vec!["open-early", "open-late", "done-early", "done-late"]
        );
        let first_done = tasks.iter().position(|t| t.completed).unwrap();
        assert!(tasks[first_done..].iter().all(|t| t.completed));
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        // equal completed flag and equal timestamps: input order must survive
        let mut tasks = vec![
            task("c", false, 1),
            task("a", false, 1),
            task("b", false, 1),
            task("z", true, 0),
        ];
        sort_tasks(&mut tasks);
        assert_eq!(titles(&tasks), vec!["c", "a", "b", "z"]);
    }

    #[test]
    fn sort_restores_creation_order_after_shuffle() {
        let ordered: Vec<Task> = (0..6).map(|i| task(&format!("t{i}"), false, i)).collect();
        let mut shuffled = vec![
            ordered[3].clone(),
            ordered[0].clone(),
            ordered[5].clone(),
            ordered[1].clone(),
            ordered[4].clone(),
            ordered[2].clone(),
        ];
        sort_tasks(&mut shuffled);
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn resolve_matches_on_time_and_title() {
        let tasks = vec![task("a", false, 1), task("b", false, 1), task("a", false, 2)];
        assert_eq!(resolve(&tasks[2].key(), &tasks), Some(2));
        assert_eq!(resolve(&tasks[1].key(), &tasks), Some(1));
        let stale = TaskKey {
            created_at: at(1),
            title: "gone".into(),
        };
        assert_eq!(resolve(&stale, &tasks), None);
    }

    #[test]
    fn create_appends_and_sorts() {
        let mut tasks = vec![task("done", true, 0)];
        let key = create_task(&mut tasks, "  write report ", at(10)).unwrap();
        assert_eq!(key.title, "write report");
        assert_eq!(titles(&tasks), vec!["write report", "done"]);
        assert!(!tasks[0].completed);
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut tasks = Vec::new();
        assert_eq!(create_task(&mut tasks, "   ", at(0)), Err(TaskError::EmptyTitle));
        assert!(tasks.is_empty());
    }

    #[test]
    fn toggle_moves_task_behind_open_ones() {
        let mut tasks = vec![task("a", false, 1), task("b", false, 2)];
        let key = tasks[0].key();
        assert_eq!(toggle_task(&mut tasks, &key), Ok(true));
        assert_eq!(titles(&tasks), vec!["b", "a"]);
        assert_eq!(toggle_task(&mut tasks, &key), Ok(false));
        assert_eq!(titles(&tasks), vec!["a", "b"]);
    }

    #[test]
    fn edit_title_keeps_creation_time() {
        let mut tasks = vec![task("old", false, 1)];
        let key = tasks[0].key();
        let new_key = edit_title(&mut tasks, &key, "new").unwrap();
        assert_eq!(tasks[0].title, "new");
        assert_eq!(new_key.created_at, at(1));
        assert!(matches!(
            edit_title(&mut tasks, &key, "again"),
            Err(TaskError::NotFound(_))
        ));
    }

    #[test]
    fn delete_missing_task_is_not_found() {
        let mut tasks = vec![task("a", false, 1)];
        let stale = task("a", false, 99).key();
        assert!(delete_task(&mut tasks, &stale).is_err());
        assert_eq!(tasks.len(), 1);
        let key = tasks[0].key();
        assert_eq!(delete_task(&mut tasks, &key).unwrap().title, "a");
        assert!(tasks.is_empty());
    }

    #[test]
    fn query_is_case_insensitive() {
        let t = task("Buy Milk", false, 0);
        assert!(matches_query(&t, "milk"));
        assert!(matches_query(&t, "BUY"));
        assert!(matches_query(&t, ""));
        assert!(!matches_query(&t, "bread"));
    }
}
