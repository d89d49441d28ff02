use crate::domain::{build_tree, FocusSession, Task};
use std::collections::HashMap;

/// Totals across the whole task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListStats {
    pub total_tasks: usize,
    pub completed_count: usize,
    pub open_count: usize,
    pub root_count: usize,
    pub total_time_secs: u64,
    pub total_sessions: usize,
}

impl ListStats {
    /// Completed share in percent (0 for an empty list)
    pub fn completion_percent(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_count as f64 / self.total_tasks as f64 * 100.0
        }
    }
}

/// Focus figures for one task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFocus {
    pub title: String,
    pub sessions: usize,
    pub focus_secs: u64,
}

/// Calculate totals for the given tasks and finished sessions
pub fn calculate_list_stats(tasks: &[Task], sessions: &[FocusSession]) -> ListStats {
    let completed_count = tasks.iter().filter(|t| t.completed).count();

    ListStats {
        total_tasks: tasks.len(),
        completed_count,
        open_count: tasks.len() - completed_count,
        root_count: build_tree(tasks).roots().len(),
        total_time_secs: tasks
            .iter()
            .fold(0u64, |acc, t| acc.saturating_add(t.time_spent)),
        total_sessions: sessions.len(),
    }
}

/// Per-task session counts, most sessions first. Sessions whose task no
/// longer exists are skipped.
pub fn calculate_session_stats(tasks: &[Task], sessions: &[FocusSession]) -> Vec<TaskFocus> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for session in sessions {
        if let Some(id) = session.task_id.as_deref() {
            *counts.entry(id).or_insert(0) += 1;
        }
    }

    let mut stats: Vec<TaskFocus> = tasks
        .iter()
        .filter_map(|task| {
            let sessions = *counts.get(task.id.as_str())?;
            Some(TaskFocus {
                title: task.title.clone(),
                sessions,
                focus_secs: task.time_spent,
            })
        })
        .collect();

    stats.sort_by(|a, b| b.sessions.cmp(&a.sessions).then_with(|| a.title.cmp(&b.title)));
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demo_tasks;
    use chrono::Utc;

    fn session(task_id: Option<&str>) -> FocusSession {
        FocusSession {
            task_id: task_id.map(String::from),
            completed_at: Utc::now(),
            duration_secs: 1500,
        }
    }

    #[test]
    fn test_list_stats_for_demo() {
        let tasks = demo_tasks("user-1");
        let stats = calculate_list_stats(&tasks, &[session(Some("2"))]);

        assert_eq!(stats.total_tasks, 5);
        assert_eq!(stats.completed_count, 2);
        assert_eq!(stats.open_count, 3);
        assert_eq!(stats.root_count, 1);
        assert_eq!(stats.total_time_secs, 5400);
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.completion_percent(), 40.0);
    }

    #[test]
    fn test_total_time_saturates() {
        let mut tasks = demo_tasks("user-1");
        tasks[0].time_spent = u64::MAX;
        let stats = calculate_list_stats(&tasks, &[]);
        assert_eq!(stats.total_time_secs, u64::MAX);
    }

    #[test]
    fn test_empty_list_stats() {
        let stats = calculate_list_stats(&[], &[]);
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_percent(), 0.0);
    }

    #[test]
    fn test_session_stats_ordering() {
        let tasks = demo_tasks("user-1");
        let sessions = vec![
            session(Some("4")),
            session(Some("2")),
            session(Some("4")),
            session(Some("deleted")),
            session(None),
        ];
        let stats = calculate_session_stats(&tasks, &sessions);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].title, "Frontend Implementation");
        assert_eq!(stats[0].sessions, 2);
        assert_eq!(stats[1].title, "Backend Setup");
    }
}
