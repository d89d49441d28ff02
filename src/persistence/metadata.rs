use crate::domain::FocusSession;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// View state stored in meta.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Tasks whose children are shown
    #[serde(default)]
    pub expanded: Vec<String>,
    /// Selected task
    #[serde(default)]
    pub selected: Option<String>,
    /// Finished focus sessions
    #[serde(default)]
    pub sessions: Vec<FocusSession>,
}

/// Load app metadata from meta.json file
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<AppMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(AppMetadata::default());
    }

    let content = std::fs::read_to_string(path)?;
    let metadata: AppMetadata = serde_json::from_str(&content)?;
    Ok(metadata)
}

/// Load metadata, falling back to defaults when the file can't be read
pub fn load_metadata_or_default<P: AsRef<Path>>(path: P) -> AppMetadata {
    let path = path.as_ref();
    match load_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {}", path.display(), e);
            AppMetadata::default()
        }
    }
}

/// Save app metadata to meta.json file
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &AppMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");

        let metadata = load_metadata(&meta_path).unwrap();
        assert!(metadata.expanded.is_empty());
        assert!(metadata.selected.is_none());
    }

    #[test]
    fn test_save_and_load_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");

        let metadata = AppMetadata {
            expanded: vec!["1".to_string(), "4".to_string()],
            selected: Some("4".to_string()),
            sessions: vec![FocusSession {
                task_id: Some("4".to_string()),
                completed_at: Utc::now(),
                duration_secs: 1500,
            }],
        };

        save_metadata(&meta_path, &metadata).unwrap();

        let loaded = load_metadata(&meta_path).unwrap();
        assert_eq!(loaded, metadata);
    }

    #[test]
    fn test_partial_metadata_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");
        std::fs::write(&meta_path, r#"{"expanded":["1"]}"#).unwrap();

        let loaded = load_metadata(&meta_path).unwrap();
        assert_eq!(loaded.expanded, vec!["1".to_string()]);
        assert!(loaded.sessions.is_empty());
    }

    #[test]
    fn test_corrupt_metadata_falls_back() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("meta.json");
        std::fs::write(&meta_path, "garbage").unwrap();

        assert!(load_metadata(&meta_path).is_err());
        assert_eq!(load_metadata_or_default(&meta_path), AppMetadata::default());
    }
}
