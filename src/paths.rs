use anyhow::{Context, Result};
use directories::BaseDirs;
use std::path::PathBuf;

use crate::store::SettingsStore;

/// Environment variable overriding the settings directory
pub const CONFIG_DIR_ENV: &str = "CCM_CONFIG_DIR";

/// All computed paths used by ccm
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.config/ccm (or $CCM_CONFIG_DIR)
    pub config_dir: PathBuf,
    /// ~/.config/ccm/settings.json
    pub settings_file: PathBuf,
}

impl Paths {
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => {
                let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
                base_dirs.home_dir().join(".config").join("ccm")
            }
        };

        Ok(Self::from_dir(config_dir))
    }

    /// Paths rooted at an explicit settings directory
    pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let settings_file = config_dir.join("settings.json");
        Self {
            config_dir,
            settings_file,
        }
    }

    /// A settings store backed by this settings file
    pub fn store(&self) -> SettingsStore {
        SettingsStore::new(&self.settings_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_settings_path() {
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        let paths = Paths::new().unwrap();
        assert!(paths.settings_file.ends_with(".config/ccm/settings.json"));
    }

    #[test]
    #[serial]
    fn test_env_override() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        unsafe { std::env::set_var(CONFIG_DIR_ENV, temp_dir.path()) };
        let paths = Paths::new().unwrap();
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };

        assert_eq!(paths.config_dir, temp_dir.path());
        assert_eq!(paths.settings_file, temp_dir.path().join("settings.json"));
    }

    #[test]
    fn test_store_uses_settings_file() {
        let paths = Paths::from_dir("/tmp/ccm-test");
        assert_eq!(paths.store().path(), paths.settings_file.as_path());
    }
}
