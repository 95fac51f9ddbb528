//! Application state management

use export::{ExportSettings, SettingsManager};
use std::path::PathBuf;
use std::sync::Mutex;

/// Settings state wrapper for thread-safe access
pub struct SettingsState {
    pub manager: Mutex<SettingsManager>,
}

impl SettingsState {
    /// Load settings from `path`, or defaults when there is no file
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let mut manager = SettingsManager::new(path);
        manager.load_sync()?;
        Ok(Self {
            manager: Mutex::new(manager),
        })
    }

    /// Defaults, persisted nowhere until saved
    pub fn in_memory() -> Self {
        Self {
            manager: Mutex::new(SettingsManager::new("chart-export.json")),
        }
    }

    /// A copy of the current settings for one export
    pub fn snapshot(&self) -> ExportSettings {
        match self.manager.lock() {
            Ok(manager) => manager.get().clone(),
            Err(poisoned) => poisoned.into_inner().get().clone(),
        }
    }

    pub fn update(&self, settings: ExportSettings) -> anyhow::Result<()> {
        let mut manager = self
            .manager
            .lock()
            .map_err(|_| anyhow::anyhow!("settings lock poisoned"))?;
        manager.update_sync(settings)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = SettingsState::load(dir.path().join("settings.json")).unwrap();
        assert_eq!(state.snapshot(), ExportSettings::default());
    }

    #[test]
    fn test_update_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let state = SettingsState::load(&path).unwrap();
        let mut settings = state.snapshot();
        settings.jpeg_quality = 80;
        state.update(settings).unwrap();

        assert_eq!(SettingsState::load(&path).unwrap().snapshot().jpeg_quality, 80);
    }
}
