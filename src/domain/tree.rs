use super::task::Task;
use std::collections::{HashMap, HashSet};

/// The task hierarchy derived from the flat list. Nodes are indices into the
/// borrowed task slice, so duplicate ids stay distinct records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTree<'a> {
    tasks: &'a [Task],
    roots: Vec<usize>,
    children: Vec<Vec<usize>>,
    total_time: Vec<u64>,
    descendants: Vec<usize>,
    completed: Vec<usize>,
}

/// One node visited by a pre-order walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry {
    /// Index of the task in the flat list
    pub task_index: usize,
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
}

impl<'a> TaskTree<'a> {
    pub fn task(&self, index: usize) -> &'a Task {
        &self.tasks[index]
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn has_children(&self, index: usize) -> bool {
        !self.children[index].is_empty()
    }

    /// Focus time of this task plus all descendants
    pub fn total_time_spent(&self, index: usize) -> u64 {
        self.total_time[index]
    }

    /// Number of descendants (not counting self)
    pub fn descendant_count(&self, index: usize) -> usize {
        self.descendants[index]
    }

    /// Number of completed tasks in this subtree, self included
    pub fn completed_count(&self, index: usize) -> usize {
        self.completed[index]
    }

    /// Every node in pre-order
    pub fn walk(&self) -> Vec<TreeEntry> {
        self.walk_where(|_| true)
    }

    /// Pre-order walk that only descends into nodes accepted by `descend`
    pub fn walk_where<F>(&self, descend: F) -> Vec<TreeEntry>
    where
        F: Fn(usize) -> bool,
    {
        let mut entries = Vec::with_capacity(self.tasks.len());
        let mut stack = Vec::new();
        push_siblings(&mut stack, &self.roots, 0);

        while let Some(entry) = stack.pop() {
            entries.push(entry);
            if descend(entry.task_index) {
                push_siblings(&mut stack, self.children(entry.task_index), entry.depth + 1);
            }
        }

        entries
    }
}

/// Push siblings so the first one is popped first
fn push_siblings(stack: &mut Vec<TreeEntry>, siblings: &[usize], depth: usize) {
    let count = siblings.len();
    for (pos, &task_index) in siblings.iter().enumerate().rev() {
        stack.push(TreeEntry {
            task_index,
            depth,
            is_last: pos + 1 == count,
        });
    }
}

/// Derive the task tree from the flat list.
///
/// Roots are tasks without a parent, tasks whose parent does not exist, and
/// tasks that name themselves as parent. Tasks caught in a parent cycle are
/// appended as extra roots, so every record appears exactly once. Sibling
/// order follows the flat list.
pub fn build_tree(tasks: &[Task]) -> TaskTree<'_> {
    // First occurrence wins for duplicate ids
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        index.entry(task.id.as_str()).or_insert(i);
    }

    let mut linked: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut starts = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        let parent = task
            .parent_id
            .as_deref()
            .and_then(|p| index.get(p).copied());
        match parent {
            Some(p) if p != i => linked[p].push(i),
            _ => starts.push(i),
        }
    }

    // Anything not reached from a regular root is only reachable through a
    // cycle; those start extra roots in list order
    let mut placed = vec![false; tasks.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    let mut roots = Vec::with_capacity(starts.len());
    for start in starts.into_iter().chain(0..tasks.len()) {
        if placed[start] {
            continue;
        }
        placed[start] = true;
        roots.push(start);

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            for &child in &linked[node] {
                if !placed[child] {
                    placed[child] = true;
                    children[node].push(child);
                    stack.push(child);
                }
            }
        }
    }

    let mut tree = TaskTree {
        tasks,
        roots,
        children,
        total_time: tasks.iter().map(|t| t.time_spent).collect(),
        descendants: vec![0; tasks.len()],
        completed: tasks.iter().map(|t| usize::from(t.completed)).collect(),
    };

    // Children follow their parent in pre-order, so the reverse is bottom-up
    for entry in tree.walk().into_iter().rev() {
        let i = entry.task_index;
        for pos in 0..tree.children[i].len() {
            let child = tree.children[i][pos];
            tree.total_time[i] = tree.total_time[i].saturating_add(tree.total_time[child]);
            tree.descendants[i] += 1 + tree.descendants[child];
            tree.completed[i] += tree.completed[child];
        }
    }

    tree
}

/// A flattened row for rendering the task tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Index in the flattened list
    pub index: usize,
    /// Index of the task record in the flat task list
    pub task_index: usize,
    /// Depth in the tree (0 = root)
    pub depth: usize,
    /// Whether this is the last child of its parent
    pub is_last: bool,
    /// Task this row shows
    pub task_id: String,
    /// Whether the task has children (shown or not)
    pub has_children: bool,
    /// Whether the children are shown
    pub expanded: bool,
}

/// Flatten the tree in pre-order. Children are only emitted for expanded tasks.
pub fn flatten_visible(tree: &TaskTree<'_>, expanded: &HashSet<String>) -> Vec<FlatRow> {
    let is_expanded = |i: usize| expanded.contains(&tree.task(i).id);

    tree.walk_where(&is_expanded)
        .into_iter()
        .enumerate()
        .map(|(index, entry)| FlatRow {
            index,
            task_index: entry.task_index,
            depth: entry.depth,
            is_last: entry.is_last,
            task_id: tree.task(entry.task_index).id.clone(),
            has_children: tree.has_children(entry.task_index),
            expanded: is_expanded(entry.task_index),
        })
        .collect()
}

/// Get tree connector for nested rows
pub fn tree_connector(is_last: bool) -> &'static str {
    if is_last {
        "└─"
    } else {
        "├─"
    }
}
