use super::task::Task;
use chrono::Utc;

/// Tasks shown on first run when nothing has been stored yet
pub fn demo_tasks(user_id: &str) -> Vec<Task> {
    let now = Utc::now();
    let make = |id: &str, title: &str, completed: bool, parent: Option<&str>, time_spent: u64| Task {
        id: id.to_string(),
        title: title.to_string(),
        completed,
        parent_id: parent.map(String::from),
        user_id: user_id.to_string(),
        created_at: now,
        time_spent,
    };

    vec![
        make("1", "Launch FlowState MVP", false, None, 0),
        make("2", "Backend Setup", true, Some("1"), 1500),
        make("3", "Configure storage", true, Some("2"), 900),
        make("4", "Frontend Implementation", false, Some("1"), 3000),
        make("5", "Build command palette", false, Some("4"), 0),
    ]
}

/// Demo tasks that start expanded
pub fn demo_expanded() -> Vec<String> {
    vec!["1".to_string(), "2".to_string(), "4".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tree::build_tree;

    #[test]
    fn test_demo_is_a_single_three_level_tree() {
        let tasks = demo_tasks("user-1");
        assert_eq!(tasks.len(), 5);

        let tree = build_tree(&tasks);
        assert_eq!(tree.roots(), &[0]);
        assert_eq!(tree.descendant_count(0), 4);
        assert_eq!(tree.total_time_spent(0), 5400);
        assert_eq!(tree.completed_count(0), 2);
    }

    #[test]
    fn test_demo_expanded_ids_exist() {
        let tasks = demo_tasks("user-1");
        for id in demo_expanded() {
            assert!(tasks.iter().any(|t| t.id == id));
        }
    }
}
