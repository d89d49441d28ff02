use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default session length: 25 minutes
pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

/// One finished countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    /// Task the timer was bound to when it finished
    pub task_id: Option<String>,
    /// When the countdown reached zero
    pub completed_at: DateTime<Utc>,
    /// Length of the session in seconds
    pub duration_secs: u32,
}

/// Result of advancing the timer by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; nothing happened
    Idle,
    /// One second was counted down
    Counted,
    /// The last second was counted and the timer stopped
    Completed,
}

impl TickOutcome {
    /// Whether a second of focus time elapsed
    pub fn counted(&self) -> bool {
        matches!(self, TickOutcome::Counted | TickOutcome::Completed)
    }
}

/// Pomodoro countdown plus the focus-mode flag it drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    pub is_running: bool,
    pub time_left: u32,
    pub focus_mode: bool,
    pub current_task_id: Option<String>,
    pub sessions: Vec<FocusSession>,
    duration: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl FocusTimer {
    pub fn new(duration_secs: u32) -> Self {
        let duration = duration_secs.max(1);
        Self {
            is_running: false,
            time_left: duration,
            focus_mode: false,
            current_task_id: None,
            sessions: Vec::new(),
            duration,
        }
    }

    /// Session length in seconds
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Start or pause for the selected task. Starting turns focus mode on.
    /// Without a selection nothing happens.
    pub fn toggle(&mut self, selected: Option<&str>) -> bool {
        let Some(task_id) = selected else {
            return false;
        };

        if self.is_running {
            self.is_running = false;
        } else {
            if self.time_left == 0 {
                self.time_left = self.duration;
            }
            self.is_running = true;
            self.focus_mode = true;
        }
        self.current_task_id = Some(task_id.to_string());
        true
    }

    /// Stop counting without touching the remaining time
    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Back to a full, stopped session with focus mode off
    pub fn reset(&mut self) {
        self.is_running = false;
        self.time_left = self.duration;
        self.focus_mode = false;
    }

    /// Stop and forget the bound task (used when that task is deleted)
    pub fn detach(&mut self) {
        self.is_running = false;
        self.current_task_id = None;
    }

    pub fn set_focus_mode(&mut self, on: bool) {
        self.focus_mode = on;
    }

    pub fn toggle_focus_mode(&mut self) {
        self.focus_mode = !self.focus_mode;
    }

    /// Advance by one second. Never goes below zero.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }
        if self.time_left == 0 {
            self.is_running = false;
            return TickOutcome::Idle;
        }
        if self.time_left <= 1 {
            self.time_left = 0;
            self.is_running = false;
            self.sessions.push(FocusSession {
                task_id: self.current_task_id.clone(),
                completed_at: Utc::now(),
                duration_secs: self.duration,
            });
            return TickOutcome::Completed;
        }
        self.time_left -= 1;
        TickOutcome::Counted
    }

    /// Elapsed share of the session, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let done = self.duration.saturating_sub(self.time_left);
        f64::from(done) / f64::from(self.duration)
    }

    /// Remaining time as "MM:SS"
    pub fn clock(&self) -> String {
        format_clock(self.time_left)
    }

    /// Sessions finished for a given task
    pub fn sessions_for(&self, task_id: &str) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.task_id.as_deref() == Some(task_id))
            .count()
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_defaults() {
        let timer = FocusTimer::default();
        assert!(!timer.is_running);
        assert_eq!(timer.time_left, 1500);
        assert!(!timer.focus_mode);
        assert!(timer.current_task_id.is_none());
        assert!(timer.sessions.is_empty());
    }

    #[test]
    fn test_toggle_requires_selection() {
        let mut timer = FocusTimer::default();
        assert!(!timer.toggle(None));
        assert!(!timer.is_running);
        assert!(!timer.focus_mode);
    }

    #[test]
    fn test_toggle_starts_and_enters_focus() {
        let mut timer = FocusTimer::default();
        assert!(timer.toggle(Some("1")));
        assert!(timer.is_running);
        assert!(timer.focus_mode);
        assert_eq!(timer.current_task_id.as_deref(), Some("1"));

        // Pausing keeps focus mode as it was
        timer.toggle(Some("1"));
        assert!(!timer.is_running);
        assert!(timer.focus_mode);
    }

    #[test]
    fn test_toggle_rebinds_task() {
        let mut timer = FocusTimer::default();
        timer.toggle(Some("1"));
        timer.toggle(Some("2"));
        assert!(!timer.is_running);
        assert_eq!(timer.current_task_id.as_deref(), Some("2"));
    }

    #[test]
    fn test_tick_counts_down_only_while_running() {
        let mut timer = FocusTimer::new(10);
        assert_eq!(timer.tick(), TickOutcome::Idle);
        assert_eq!(timer.time_left, 10);

        timer.toggle(Some("1"));
        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.time_left, 9);
    }

    #[test]
    fn test_countdown_halts_at_zero() {
        let mut timer = FocusTimer::new(3);
        timer.toggle(Some("1"));

        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.tick(), TickOutcome::Counted);
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert_eq!(timer.time_left, 0);
        assert!(!timer.is_running);

        for _ in 0..5 {
            assert_eq!(timer.tick(), TickOutcome::Idle);
        }
        assert_eq!(timer.time_left, 0);
        assert_eq!(timer.sessions.len(), 1);
        assert_eq!(timer.sessions_for("1"), 1);
    }

    #[test]
    fn test_restart_after_completion_runs_full_session() {
        let mut timer = FocusTimer::new(1);
        timer.toggle(Some("1"));
        assert_eq!(timer.tick(), TickOutcome::Completed);

        timer.toggle(Some("1"));
        assert!(timer.is_running);
        assert_eq!(timer.time_left, 1);
    }

    #[test]
    fn test_reset() {
        let mut timer = FocusTimer::new(60);
        timer.toggle(Some("1"));
        timer.tick();
        timer.reset();

        assert!(!timer.is_running);
        assert!(!timer.focus_mode);
        assert_eq!(timer.time_left, 60);
        assert_eq!(timer.current_task_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_detach() {
        let mut timer = FocusTimer::default();
        timer.toggle(Some("1"));
        timer.detach();
        assert!(!timer.is_running);
        assert!(timer.current_task_id.is_none());
    }

    #[test]
    fn test_progress() {
        let mut timer = FocusTimer::new(4);
        assert_eq!(timer.progress(), 0.0);
        timer.toggle(Some("1"));
        timer.tick();
        assert_eq!(timer.progress(), 0.25);
        timer.tick();
        timer.tick();
        timer.tick();
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_zero_duration_is_clamped() {
        let timer = FocusTimer::new(0);
        assert_eq!(timer.duration(), 1);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(0), "00:00");
    }
}
