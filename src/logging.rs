use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Environment variable holding the log filter (env_logger syntax)
pub const LOG_ENV: &str = "FLOWSTATE_LOG";

/// Route `log` output to a file so it never draws over the terminal UI
pub fn init_file_logging(path: &Path, default_filter: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .context("Logger already initialized")?;

    Ok(())
}
