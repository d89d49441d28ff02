use super::task::Task;
use std::collections::HashSet;
use uuid::Uuid;

/// Flat, ordered collection of tasks keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Direct children of a task, in list order
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |t| t.parent_id.as_deref() == Some(id) && t.id != id)
    }

    /// Give every repeated id after the first a fresh one so each record can
    /// be addressed on its own. Children keep pointing at the first record.
    /// Returns the number of records changed.
    pub fn repair_duplicate_ids(&mut self) -> usize {
        let mut seen = HashSet::new();
        let mut repaired = 0;
        for task in &mut self.tasks {
            if !seen.insert(task.id.clone()) {
                let fresh = Uuid::new_v4().to_string();
                log::warn!("Duplicate task id {} reassigned to {}", task.id, fresh);
                task.id = fresh.clone();
                seen.insert(fresh);
                repaired += 1;
            }
        }
        repaired
    }

    /// Append a new task and return its id. The parent is not validated.
    pub fn add(&mut self, title: String, parent_id: Option<String>, user_id: String) -> String {
        let task = Task::new(title, parent_id, user_id);
        let id = task.id.clone();
        self.tasks.push(task);
        id
    }

    /// Flip the completion flag. Returns false for an unknown id.
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Replace the title. Unknown ids and blank titles are ignored.
    pub fn rename(&mut self, id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(task) => {
                task.title = title.to_string();
                true
            }
            None => false,
        }
    }

    /// Add focus seconds to a task
    pub fn add_time_spent(&mut self, id: &str, secs: u64) -> bool {
        match self.get_mut(id) {
            Some(task) => {
                task.time_spent = task.time_spent.saturating_add(secs);
                true
            }
            None => false,
        }
    }

    /// The id followed by all transitive children, depth-first pre-order.
    /// Returns an empty list when the id is unknown.
    pub fn collect_subtree(&self, id: &str) -> Vec<String> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut collected = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![id.to_string()];

        while let Some(current) = stack.pop() {
            // Parent cycles would otherwise loop forever
            if !seen.insert(current.clone()) {
                continue;
            }
            let children: Vec<String> = self
                .children_of(&current)
                .map(|t| t.id.clone())
                .collect();
            collected.push(current);
            // Reverse so the first child is visited first
            stack.extend(children.into_iter().rev());
        }

        collected
    }

    /// Remove a task and all of its descendants. Returns the removed ids.
    pub fn delete(&mut self, id: &str) -> Vec<String> {
        let doomed = self.collect_subtree(id);
        if doomed.is_empty() {
            return doomed;
        }
        let doomed_set: HashSet<&str> = doomed.iter().map(String::as_str).collect();
        self.tasks.retain(|t| !doomed_set.contains(t.id.as_str()));
        doomed
    }
}
