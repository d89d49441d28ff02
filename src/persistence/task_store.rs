use crate::domain::Task;
use crate::persistence::atomic_write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures reading or writing the stored task list
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read task list {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("task list {} is not valid: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode task list")]
    Encode(#[from] serde_json::Error),
}

/// Load the stored task list. `Ok(None)` when nothing has been stored yet.
pub fn load_tasks<P: AsRef<Path>>(path: P) -> Result<Option<Vec<Task>>, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tasks = serde_json::from_str(&content).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(tasks))
}

/// Serialize the task list to its stored JSON form
pub fn encode_tasks(tasks: &[Task]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Overwrite the stored task list
pub fn save_tasks<P: AsRef<Path>>(path: P, tasks: &[Task]) -> anyhow::Result<()> {
    let json = encode_tasks(tasks)?;
    atomic_write(path, &json)?;
    log::debug!("Saved {} tasks", tasks.len());
    Ok(())
}
