use crate::domain::{build_tree, format_seconds, FocusSession, Task, TaskTree};
use crate::persistence::{atomic_write, ensure_data_dir};
use crate::report::stats::{calculate_list_stats, calculate_session_stats};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Indented plain-text outline of the full tree (every task, ignoring
/// expand state), used by `flowstate list`
pub fn render_outline(tasks: &[Task]) -> String {
    let tree = build_tree(tasks);
    let mut out = String::new();

    for entry in tree.walk() {
        let task = tree.task(entry.task_index);
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!(
            "{}{} {}  ({})",
            "  ".repeat(entry.depth),
            checkbox,
            task.title,
            task.id
        ));
        let total = tree.total_time_spent(entry.task_index);
        if total > 0 {
            out.push_str(&format!("  {}", format_seconds(total)));
        }
        out.push('\n');
    }
    out
}

/// Build the markdown report text
pub fn build_report(tasks: &[Task], sessions: &[FocusSession], date: NaiveDate) -> String {
    let stats = calculate_list_stats(tasks, sessions);
    let mut report = String::new();

    // Header
    report.push_str(&format!("# FlowState Report - {}\n\n", date));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Total Tasks:** {} (Open: {}, Completed: {})\n",
        stats.total_tasks, stats.open_count, stats.completed_count
    ));
    report.push_str(&format!(
        "- **Completion Rate:** {}\n",
        format_percent(stats.completion_percent())
    ));
    report.push_str(&format!(
        "- **Focus Time:** {}\n",
        format_seconds(stats.total_time_secs)
    ));
    report.push_str(&format!("- **Focus Sessions:** {}\n\n", stats.total_sessions));

    // Task Tree Section
    report.push_str("## Task Tree\n\n");
    if tasks.is_empty() {
        report.push_str("_No tasks._\n");
    } else {
        push_tree(&build_tree(tasks), &mut report);
    }
    report.push('\n');

    // Focus Sessions Section
    let per_task = calculate_session_stats(tasks, sessions);
    if !per_task.is_empty() {
        report.push_str("## Focus Sessions\n\n");
        report.push_str("| Task | Sessions | Time Spent |\n");
        report.push_str("|------|----------|------------|\n");
        for entry in &per_task {
            report.push_str(&format!(
                "| {} | {} | {} |\n",
                entry.title,
                entry.sessions,
                format_seconds(entry.focus_secs)
            ));
        }
        report.push('\n');
    }

    report
}

fn push_tree(tree: &TaskTree<'_>, out: &mut String) {
    for entry in tree.walk() {
        let i = entry.task_index;
        let task = tree.task(i);
        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        out.push_str(&format!("{}- {} {}", "  ".repeat(entry.depth), checkbox, task.title));

        let total = tree.total_time_spent(i);
        if total > 0 {
            out.push_str(&format!(" ({})", format_seconds(total)));
        }
        if tree.has_children(i) {
            out.push_str(&format!(
                " [{}/{} done]",
                tree.completed_count(i) - usize::from(task.completed),
                tree.descendant_count(i)
            ));
        }
        out.push('\n');
    }
}

/// Write a report for today. Defaults to <data dir>/report-YYYY-MM-DD.md
pub fn generate_report(
    tasks: &[Task],
    sessions: &[FocusSession],
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let date = Local::now().date_naive();
    let report = build_report(tasks, sessions, date);

    let path = match output_path {
        Some(path) => path,
        None => ensure_data_dir()?.join(format!("report-{}.md", date.format("%Y-%m-%d"))),
    };

    atomic_write(&path, &report)?;
    log::info!("Report written to {}", path.display());
    Ok(path)
}
