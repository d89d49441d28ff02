mod app;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod sync;
mod ticker;
mod ui;

use anyhow::{bail, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use config::{load_settings, Settings};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{demo_expanded, demo_tasks, Task};
use persistence::{
    config_file, ensure_data_dir, init_local_dir, load_metadata_or_default, load_tasks, log_file,
    meta_file, tasks_file, AppMetadata,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flowstate")]
#[command(about = "A terminal task tree with a built-in focus timer", long_about = None)]
struct Cli {
    /// Length of one focus session in minutes (overrides config.json)
    #[arg(long, global = true)]
    focus_minutes: Option<u32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .flowstate directory in the current directory
    Init,
    /// Print the task tree
    List,
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Id of the parent task
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Flip a task between open and completed
    Toggle {
        /// Task id
        id: String,
    },
    /// Delete a task and all of its subtasks
    Rm {
        /// Task id
        id: String,
    },
    /// Write a markdown report of the task tree
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_dir()?;
        let config_path = dir.join("config.json");
        if !config_path.exists() {
            config::save_settings(&config_path, &Settings::default())?;
        }
        println!("Initialized flowstate directory: {}", dir.display());
        println!();
        println!("FlowState will now use this local directory for task storage.");
        println!("Run 'flowstate' to start.");
        return Ok(());
    }

    ensure_data_dir()?;
    let settings = load_settings(config_file()?)?.with_focus_minutes(cli.focus_minutes);

    if let Err(e) = logging::init_file_logging(&log_file()?, "info") {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let mut app = load_app(settings)?;

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::List) => {
            if app.tasks.is_empty() {
                println!("No tasks yet. Add one with 'flowstate add <title>'.");
            } else {
                print!("{}", report::render_outline(app.tasks.tasks()));
            }
            app.save()
        }
        Some(Commands::Add { title, parent }) => {
            let title = title.trim().to_string();
            if title.is_empty() {
                bail!("Task title cannot be empty");
            }
            if let Some(parent_id) = &parent {
                if !app.tasks.contains(parent_id) {
                    bail!("No task with id {}", parent_id);
                }
            }
            let id = app.add_task(title, parent);
            app.save()?;
            println!("Added task {}", id);
            Ok(())
        }
        Some(Commands::Toggle { id }) => {
            if !app.toggle_completed(&id) {
                bail!("No task with id {}", id);
            }
            app.save()?;
            let done = app.tasks.get(&id).map(|t| t.completed).unwrap_or(false);
            println!("{} {}", if done { "Completed" } else { "Reopened" }, id);
            Ok(())
        }
        Some(Commands::Rm { id }) => {
            let removed = app.delete_task(&id);
            if removed.is_empty() {
                bail!("No task with id {}", id);
            }
            app.save()?;
            println!("Deleted {} task(s)", removed.len());
            Ok(())
        }
        Some(Commands::Report { output }) => {
            let output_path = output.map(PathBuf::from);
            let path =
                report::generate_report(app.tasks.tasks(), &app.timer.sessions, output_path)?;
            println!("Report generated: {}", path.display());
            Ok(())
        }
        None => run_tui(app),
    }
}

/// Load tasks and view state. A missing task file is seeded with demo data
/// (when enabled); a malformed one is an error.
fn load_app(settings: Settings) -> Result<AppState> {
    let path = tasks_file()?;
    let stored = load_tasks(&path)?;
    let metadata = load_metadata_or_default(meta_file()?);

    let app = match stored {
        Some(tasks) => {
            log::info!("Loaded {} tasks from {}", tasks.len(), path.display());
            AppState::new(tasks, metadata, settings)
        }
        None => seeded_app(settings),
    };
    Ok(app)
}

fn seeded_app(settings: Settings) -> AppState {
    let (tasks, metadata): (Vec<Task>, AppMetadata) = if settings.seed_demo {
        log::info!("No stored tasks, seeding demo data");
        let metadata = AppMetadata {
            expanded: demo_expanded(),
            ..AppMetadata::default()
        };
        (demo_tasks(&settings.user_id), metadata)
    } else {
        (Vec::new(), AppMetadata::default())
    };

    let mut app = AppState::new(tasks, metadata, settings);
    app.mark_all_dirty();
    app
}

fn run_tui(mut app: AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stop counting before the final save
    app.timer.pause();

    // Save on exit
    if let Err(e) = app.save() {
        log::error!("Error saving state: {:#}", e);
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = result {
        log::error!("{:#}", err);
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Tick timer
        app.tick();

        // Autosave if needed
        app.save()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_add_with_parent() {
        let cli = Cli::parse_from(["flowstate", "add", "Write docs", "--parent", "1"]);
        match cli.command {
            Some(Commands::Add { title, parent }) => {
                assert_eq!(title, "Write docs");
                assert_eq!(parent.as_deref(), Some("1"));
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_cli_focus_minutes_is_global() {
        let cli = Cli::parse_from(["flowstate", "list", "--focus-minutes", "50"]);
        assert_eq!(cli.focus_minutes, Some(50));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_cli_defaults_to_tui() {
        let cli = Cli::parse_from(["flowstate"]);
        assert!(cli.command.is_none());
        assert!(cli.focus_minutes.is_none());
    }

    #[test]
    fn test_seeded_app_uses_demo_data() {
        let app = seeded_app(Settings::default());
        assert_eq!(app.tasks.len(), 5);
        assert!(app.expanded.contains("1"));
        assert!(app.needs_save);
        assert!(app.meta_needs_save);
    }

    #[test]
    fn test_seeded_app_without_demo_is_empty() {
        let settings = Settings {
            seed_demo: false,
            ..Settings::default()
        };
        let app = seeded_app(settings);
        assert!(app.tasks.is_empty());
        assert!(app.needs_save);
    }
}
