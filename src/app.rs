use crate::config::Settings;
use crate::domain::{
    build_tree, filter_commands, flatten_visible, Command, FlatRow, FocusTimer, Task, TaskList,
    TickOutcome, UiMode,
};
use crate::notifications;
use crate::persistence::AppMetadata;
use crate::sync::{self, SyncEvent};
use crate::ticker::SecondPulse;
use anyhow::Result;
use std::collections::HashSet;
use std::time::Instant;

/// What the input form will do on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPurpose {
    NewTask { parent_id: Option<String> },
    Rename { task_id: String },
}

/// Input form state for adding and renaming tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormState {
    pub text: String,
    pub purpose: FormPurpose,
}

/// Command palette state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteState {
    pub query: String,
    pub highlighted: usize,
}

/// Main application state
pub struct AppState {
    pub tasks: TaskList,
    pub expanded: HashSet<String>,
    pub selected_id: Option<String>,
    pub timer: FocusTimer,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub palette: Option<PaletteState>,
    pub settings: Settings,
    /// Task list changed since the last save
    pub needs_save: bool,
    /// Expanded rows, selection or session log changed since the last save
    pub meta_needs_save: bool,
    pulse: SecondPulse,
}

impl AppState {
    pub fn new(tasks: Vec<Task>, metadata: AppMetadata, settings: Settings) -> Self {
        let mut tasks = TaskList::new(tasks);
        let repaired = tasks.repair_duplicate_ids();

        let selected_id = metadata.selected.filter(|id| tasks.contains(id));
        let expanded = metadata
            .expanded
            .into_iter()
            .filter(|id| tasks.contains(id))
            .collect();

        let mut timer = FocusTimer::new(settings.focus_secs());
        timer.sessions = metadata.sessions;

        Self {
            tasks,
            expanded,
            selected_id,
            timer,
            ui_mode: UiMode::Normal,
            input_form: None,
            palette: None,
            settings,
            needs_save: repaired > 0,
            meta_needs_save: false,
            pulse: SecondPulse::new(Instant::now()),
        }
    }

    /// Snapshot of the view state for meta.json
    pub fn metadata(&self) -> AppMetadata {
        let mut expanded: Vec<String> = self.expanded.iter().cloned().collect();
        expanded.sort();
        AppMetadata {
            expanded,
            selected: self.selected_id.clone(),
            sessions: self.timer.sessions.clone(),
        }
    }

    /// Rows currently visible in the task tree
    pub fn visible_rows(&self) -> Vec<FlatRow> {
        flatten_visible(&build_tree(self.tasks.tasks()), &self.expanded)
    }

    /// Position of the selected task among the visible rows
    pub fn selected_row_index(&self) -> Option<usize> {
        let selected = self.selected_id.as_deref()?;
        self.visible_rows()
            .iter()
            .position(|row| row.task_id == selected)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_id.as_deref().and_then(|id| self.tasks.get(id))
    }

    /// Task the timer is bound to
    pub fn timer_task(&self) -> Option<&Task> {
        self.timer
            .current_task_id
            .as_deref()
            .and_then(|id| self.tasks.get(id))
    }

    pub fn select(&mut self, id: Option<String>) {
        if self.selected_id != id {
            self.selected_id = id;
            self.meta_needs_save = true;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        let rows = self.visible_rows();
        let target = match self.selected_row_index() {
            Some(idx) => rows.get(idx.saturating_sub(1)),
            None => rows.first(),
        };
        let id = target.map(|row| row.task_id.clone());
        if id.is_some() {
            self.select(id);
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let rows = self.visible_rows();
        let target = match self.selected_row_index() {
            Some(idx) if idx + 1 < rows.len() => rows.get(idx + 1),
            Some(idx) => rows.get(idx),
            None => rows.first(),
        };
        let id = target.map(|row| row.task_id.clone());
        if id.is_some() {
            self.select(id);
        }
    }

    /// Add a task (or a subtask when `parent_id` is set) and select it
    pub fn add_task(&mut self, title: String, parent_id: Option<String>) -> String {
        let id = self
            .tasks
            .add(title, parent_id.clone(), self.settings.user_id.clone());

        if let Some(parent) = parent_id {
            self.expanded.insert(parent);
        }
        log::info!("Created task {}", id);
        sync::publish(&SyncEvent::Created(id.clone()));

        self.select(Some(id.clone()));
        self.needs_save = true;
        self.meta_needs_save = true;
        id
    }

    /// Rename a task; blank titles are ignored
    pub fn rename_task(&mut self, id: &str, title: &str) -> bool {
        let renamed = self.tasks.rename(id, title);
        if renamed {
            sync::publish(&SyncEvent::Updated(id.to_string()));
            self.needs_save = true;
        }
        renamed
    }

    /// Flip completion of a task
    pub fn toggle_completed(&mut self, id: &str) -> bool {
        let toggled = self.tasks.toggle_completed(id);
        if toggled {
            sync::publish(&SyncEvent::Updated(id.to_string()));
            self.needs_save = true;
        }
        toggled
    }

    pub fn toggle_selected_completed(&mut self) {
        if let Some(id) = self.selected_id.clone() {
            self.toggle_completed(&id);
        }
    }

    /// Delete a task with its whole subtree
    pub fn delete_task(&mut self, id: &str) -> Vec<String> {
        let removed = self.tasks.delete(id);
        if removed.is_empty() {
            return removed;
        }

        let gone: HashSet<&str> = removed.iter().map(String::as_str).collect();
        self.expanded.retain(|id| !gone.contains(id.as_str()));

        if self
            .selected_id
            .as_deref()
            .is_some_and(|id| gone.contains(id))
        {
            self.selected_id = None;
        }
        if self
            .timer
            .current_task_id
            .as_deref()
            .is_some_and(|id| gone.contains(id))
        {
            self.timer.detach();
        }

        log::info!("Deleted {} task(s) under {}", removed.len(), id);
        sync::publish(&SyncEvent::Deleted(removed.clone()));
        self.needs_save = true;
        self.meta_needs_save = true;
        removed
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_id.clone() {
            self.delete_task(&id);
        }
    }

    /// Toggle collapse/expand for the selected task (only if it has children)
    pub fn toggle_expand(&mut self) {
        let Some(id) = self.selected_id.clone() else {
            return;
        };
        if self.tasks.children_of(&id).next().is_none() {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
        self.meta_needs_save = true;
    }

    /// Show the selected task's children
    pub fn expand_selected(&mut self) {
        if let Some(id) = self.selected_id.clone() {
            if self.tasks.children_of(&id).next().is_some() && self.expanded.insert(id) {
                self.meta_needs_save = true;
            }
        }
    }

    /// Hide the selected task's children, or jump to its parent if already hidden
    pub fn collapse_selected(&mut self) {
        let Some(id) = self.selected_id.clone() else {
            return;
        };
        if self.expanded.remove(&id) {
            self.meta_needs_save = true;
            return;
        }
        let parent = self
            .tasks
            .get(&id)
            .and_then(|t| t.parent_id.clone())
            .filter(|p| p != &id && self.tasks.contains(p));
        if parent.is_some() {
            self.select(parent);
        }
    }

    /// Start adding a root task (opens input form)
    pub fn start_add_task(&mut self) {
        self.open_form(String::new(), FormPurpose::NewTask { parent_id: None });
    }

    /// Start adding a subtask under the selection
    pub fn start_add_subtask(&mut self) {
        if let Some(parent) = self.selected_id.clone() {
            self.open_form(
                String::new(),
                FormPurpose::NewTask {
                    parent_id: Some(parent),
                },
            );
        }
    }

    /// Start renaming the selection (form prefilled with the current title)
    pub fn start_rename(&mut self) {
        if let Some(task) = self.selected_task() {
            let title = task.title.clone();
            let task_id = task.id.clone();
            self.open_form(title, FormPurpose::Rename { task_id });
        }
    }

    fn open_form(&mut self, text: String, purpose: FormPurpose) {
        self.input_form = Some(InputFormState { text, purpose });
        self.ui_mode = UiMode::EditingForm;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.text.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.text.pop();
        }
    }

    /// Submit the form: create or rename
    pub fn submit_input_form(&mut self) {
        if let Some(form) = self.input_form.take() {
            match form.purpose {
                FormPurpose::NewTask { parent_id } => {
                    let title = form.text.trim();
                    if !title.is_empty() {
                        self.add_task(title.to_string(), parent_id);
                    }
                }
                FormPurpose::Rename { task_id } => {
                    self.rename_task(&task_id, &form.text);
                }
            }
        }
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Start/pause the timer for the selected task
    pub fn toggle_timer(&mut self) {
        let selected = self.selected_id.clone();
        if self.timer.toggle(selected.as_deref()) {
            log::info!(
                "Timer {} for task {}",
                if self.timer.is_running { "started" } else { "paused" },
                selected.as_deref().unwrap_or_default()
            );
        }
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        log::info!("Timer reset");
    }

    pub fn toggle_focus_mode(&mut self) {
        self.timer.toggle_focus_mode();
    }

    pub fn exit_focus_mode(&mut self) {
        self.timer.set_focus_mode(false);
    }

    /// Count down whatever whole seconds have passed since the last tick
    pub fn tick(&mut self) {
        let secs = self.pulse.drain(Instant::now());
        self.advance_seconds(secs);
    }

    /// Advance the timer; each counted second is credited to the bound task
    pub fn advance_seconds(&mut self, secs: u64) {
        for _ in 0..secs {
            let outcome = self.timer.tick();
            if outcome.counted() {
                if let Some(id) = self.timer.current_task_id.clone() {
                    if self.tasks.add_time_spent(&id, 1) {
                        self.needs_save = true;
                    }
                }
            }
            match outcome {
                TickOutcome::Idle => break,
                TickOutcome::Completed => self.on_session_complete(),
                TickOutcome::Counted => {}
            }
        }
    }

    fn on_session_complete(&mut self) {
        let title = self
            .timer_task()
            .map(|t| t.title.clone())
            .unwrap_or_else(|| "Focus session".to_string());
        log::info!("Focus session complete: {}", title);
        if self.settings.notifications {
            notifications::notify_session_complete(&title);
        }
        self.meta_needs_save = true;
    }

    /// Open the command palette
    pub fn open_palette(&mut self) {
        self.palette = Some(PaletteState::default());
        self.ui_mode = UiMode::CommandPalette;
    }

    pub fn close_palette(&mut self) {
        self.palette = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Commands matching the current palette query
    pub fn palette_commands(&self) -> Vec<Command> {
        self.palette
            .as_ref()
            .map(|p| filter_commands(&p.query))
            .unwrap_or_default()
    }

    pub fn palette_add_char(&mut self, c: char) {
        if let Some(palette) = &mut self.palette {
            palette.query.push(c);
            palette.highlighted = 0;
        }
    }

    pub fn palette_backspace(&mut self) {
        if let Some(palette) = &mut self.palette {
            palette.query.pop();
            palette.highlighted = 0;
        }
    }

    pub fn palette_move_up(&mut self) {
        if let Some(palette) = &mut self.palette {
            palette.highlighted = palette.highlighted.saturating_sub(1);
        }
    }

    pub fn palette_move_down(&mut self) {
        let count = self.palette_commands().len();
        if let Some(palette) = &mut self.palette {
            if palette.highlighted + 1 < count {
                palette.highlighted += 1;
            }
        }
    }

    /// Run the highlighted command; disabled commands leave the palette open
    pub fn palette_execute(&mut self) {
        let highlighted = self.palette.as_ref().map_or(0, |p| p.highlighted);
        let Some(command) = self.palette_commands().get(highlighted).copied() else {
            return;
        };
        if !command.is_enabled(self.selected_id.is_some()) {
            return;
        }
        self.close_palette();
        self.run_command(command);
    }

    pub fn run_command(&mut self, command: Command) {
        match command {
            Command::NewTask => {
                self.add_task("New task".to_string(), None);
                self.start_rename();
            }
            Command::StartTimer => self.toggle_timer(),
            Command::ResetTimer => self.reset_timer(),
            Command::ToggleFocusMode => self.toggle_focus_mode(),
        }
    }

    /// Escape closes the palette and leaves focus mode
    pub fn escape(&mut self) {
        if self.palette.is_some() {
            self.close_palette();
        }
        self.exit_focus_mode();
    }

    /// Write whatever changed since the last save
    pub fn save(&mut self) -> Result<()> {
        use crate::persistence::{meta_file, save_metadata, save_tasks, tasks_file};

        if self.needs_save {
            save_tasks(tasks_file()?, self.tasks.tasks())?;
            self.needs_save = false;
        }
        if self.meta_needs_save {
            save_metadata(meta_file()?, &self.metadata())?;
            self.meta_needs_save = false;
        }
        Ok(())
    }

    /// Mark everything dirty so the next save rewrites both files
    pub fn mark_all_dirty(&mut self) {
        self.needs_save = true;
        self.meta_needs_save = true;
    }
}
