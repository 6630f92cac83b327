// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use qsolog::preferences::Preferences;

const APP_DIR: &str = "qsolog";
const PREFERENCES_FILE: &str = "preferences.ini";

/// The per-user configuration directory holding the preferences file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDir {
    path: PathBuf,
}

impl ConfigDir {
    /// `<config dir>/qsolog`, falling back to `~/.config/qsolog`, then `./qsolog`.
    pub fn locate() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join(APP_DIR))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.path.join(PREFERENCES_FILE)
    }

    /// Creates the directory if needed. Failure is logged; the application carries on with
    /// default preferences.
    pub fn ensure(&self) -> bool {
        match std::fs::create_dir_all(&self.path) {
            Ok(()) => true,
            Err(err) => {
                log::error!(
                    "Could not create configuration directory {}: {}",
                    self.path.display(),
                    err
                );
                false
            }
        }
    }

    /// Reads the preferences file. `None` means there is no usable configuration, either
    /// because the file doesn't exist yet or because it couldn't be read.
    pub fn load_preferences(&self) -> Option<Preferences> {
        let path = self.preferences_path();
        if !path.exists() {
            log::info!("No preferences at {}, using defaults", path.display());
            return None;
        }
        match Preferences::read(&path) {
            Ok(preferences) => {
                log::debug!("Loaded preferences from {}", path.display());
                Some(preferences)
            }
            Err(err) => {
                log::error!("Ignoring preferences: {err:#}");
                None
            }
        }
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.path)?;
        preferences.write(&self.preferences_path())?;
        log::info!("Saved preferences to {}", self.preferences_path().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(dir.path().join("qsolog"));
        assert!(config.ensure());
        assert!(config.path().is_dir());
        assert_eq!(config.load_preferences(), None);
    }

    #[test]
    fn corrupt_file_means_no_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(dir.path());
        std::fs::write(config.preferences_path(), "[general\nshow_toolbox True\n").unwrap();
        assert_eq!(config.load_preferences(), None);
        std::fs::write(config.preferences_path(), "general=yes\n").unwrap();
        assert_eq!(config.load_preferences(), None);
        std::fs::write(config.preferences_path(), [0xff, 0xfe, 0x00, 0x9c]).unwrap();
        assert_eq!(config.load_preferences(), None);
    }

    #[test]
    fn ensure_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let config = ConfigDir::at(blocker.join("qsolog"));
        assert!(!config.ensure());
        assert_eq!(config.load_preferences(), None);
    }

    #[test]
    fn saved_preferences_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigDir::at(dir.path().join("nested").join("qsolog"));
        let mut preferences = Preferences::default();
        preferences.general.show_toolbox = true;
        config.save_preferences(&preferences).unwrap();
        assert_eq!(config.load_preferences(), Some(preferences));
    }
}
