pub mod demo;
pub mod enums;
pub mod palette;
pub mod task;
pub mod task_list;
pub mod timer;
pub mod tree;

pub use demo::{demo_expanded, demo_tasks};
pub use enums::UiMode;
pub use palette::{filter_commands, Command};
pub use task::{format_seconds, Task};
pub use task_list::TaskList;
pub use timer::{format_clock, FocusSession, FocusTimer, TickOutcome, DEFAULT_FOCUS_SECS};
pub use tree::{build_tree, flatten_visible, tree_connector, FlatRow, TaskTree};
