use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item. Hierarchy is expressed through `parent_id` only;
/// the tree is derived on demand (see `domain::tree`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID (UUID v4 for new tasks)
    pub id: String,
    /// Task title
    pub title: String,
    /// Whether the task is checked off
    pub completed: bool,
    /// Parent task, if this is a subtask
    pub parent_id: Option<String>,
    /// Owner
    pub user_id: String,
    /// When the task was created
    pub created_at: DateTime<Utc>,
    /// Accumulated focus time in seconds
    #[serde(default)]
    pub time_spent: u64,
}

impl Task {
    pub fn new(title: String, parent_id: Option<String>, user_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            completed: false,
            parent_id,
            user_id,
            created_at: Utc::now(),
            time_spent: 0,
        }
    }

    /// Time spent formatted as "Xh Ym" (omits 0 values)
    pub fn time_spent_formatted(&self) -> String {
        format_seconds(self.time_spent)
    }
}

/// Format a number of seconds as "Xh Ym", "Ym" or "Zs" for short spans
pub fn format_seconds(secs: u64) -> String {
    let total_minutes = secs / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write docs".to_string(), None, "user-1".to_string());
        assert_eq!(task.title, "Write docs");
        assert!(!task.completed);
        assert!(task.parent_id.is_none());
        assert_eq!(task.time_spent, 0);
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new("A".to_string(), None, "user-1".to_string());
        let b = Task::new("B".to_string(), None, "user-1".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_deserialize_stored_shape() {
        let json = r#"{
            "id": "2",
            "title": "Backend Setup",
            "completed": true,
            "parent_id": "1",
            "user_id": "user-1",
            "created_at": "2024-05-01T09:30:00.000Z",
            "time_spent": 1500
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "2");
        assert_eq!(task.parent_id.as_deref(), Some("1"));
        assert!(task.completed);
        assert_eq!(task.time_spent, 1500);
    }

    #[test]
    fn test_deserialize_null_parent() {
        let json = r#"{"id":"1","title":"Root","completed":false,"parent_id":null,
            "user_id":"user-1","created_at":"2024-05-01T09:30:00Z","time_spent":0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.parent_id.is_none());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0s");
        assert_eq!(format_seconds(45), "45s");
        assert_eq!(format_seconds(900), "15m");
        assert_eq!(format_seconds(3600), "1h");
        assert_eq!(format_seconds(5400), "1h 30m");
    }
}
