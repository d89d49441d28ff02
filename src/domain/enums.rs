/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing a title for a new task or a rename
    EditingForm,
    /// Command palette overlay is open
    CommandPalette,
}
