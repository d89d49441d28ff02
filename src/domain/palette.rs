/// Commands offered by the command palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NewTask,
    StartTimer,
    ResetTimer,
    ToggleFocusMode,
}

impl Command {
    /// Get all commands in display order
    pub fn all() -> &'static [Command] {
        &[
            Command::NewTask,
            Command::StartTimer,
            Command::ResetTimer,
            Command::ToggleFocusMode,
        ]
    }

    /// Get the display label
    pub fn label(&self) -> &'static str {
        match self {
            Command::NewTask => "New Task",
            Command::StartTimer => "Start Timer",
            Command::ResetTimer => "Reset Timer",
            Command::ToggleFocusMode => "Toggle Focus Mode",
        }
    }

    /// Get the glyph shown next to the label
    pub fn symbol(&self) -> &'static str {
        match self {
            Command::NewTask => "+",
            Command::StartTimer => "▶",
            Command::ResetTimer => "⟲",
            Command::ToggleFocusMode => "⚡",
        }
    }

    /// Starting the timer needs a selected task
    pub fn is_enabled(&self, has_selection: bool) -> bool {
        match self {
            Command::StartTimer => has_selection,
            _ => true,
        }
    }
}

/// Commands whose label contains the query, case-insensitively
pub fn filter_commands(query: &str) -> Vec<Command> {
    let needle = query.to_lowercase();
    Command::all()
        .iter()
        .copied()
        .filter(|cmd| cmd.label().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_lists_everything() {
        assert_eq!(filter_commands(""), Command::all().to_vec());
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        assert_eq!(
            filter_commands("TIMER"),
            vec![Command::StartTimer, Command::ResetTimer]
        );
        assert_eq!(filter_commands("focus"), vec![Command::ToggleFocusMode]);
        assert_eq!(filter_commands("ew ta"), vec![Command::NewTask]);
        assert!(filter_commands("xyz").is_empty());
    }

    #[test]
    fn test_start_timer_needs_selection() {
        assert!(!Command::StartTimer.is_enabled(false));
        assert!(Command::StartTimer.is_enabled(true));
        assert!(Command::ResetTimer.is_enabled(false));
        assert!(Command::NewTask.is_enabled(false));
    }
}
