use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Seconds between two schedule reloads of the topbar.
    #[serde(default = "default_data_refresh")]
    pub data_refresh_secs: u64,
    /// Seconds between two topbar redraws.
    #[serde(default = "default_display_refresh")]
    pub display_refresh_secs: u64,
    #[serde(default = "default_reminder_interval")]
    pub reminder_interval_secs: u64,
    /// How often the topbar looks for writes made by other classtop processes.
    #[serde(default = "default_change_poll")]
    pub change_poll_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_bar_width")]
    pub progress_bar_width: usize,
}

fn default_data_refresh() -> u64 {
    10
}
fn default_display_refresh() -> u64 {
    1
}
fn default_reminder_interval() -> u64 {
    60
}
fn default_change_poll() -> u64 {
    2
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_bar_width() -> usize {
    24
}

/// Keys every config file is expected to carry (`config --check`).
pub const CONFIG_KEYS: [&str; 7] = [
    "database",
    "data_refresh_secs",
    "display_refresh_secs",
    "reminder_interval_secs",
    "change_poll_secs",
    "log_level",
    "progress_bar_width",
];

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            data_refresh_secs: default_data_refresh(),
            display_refresh_secs: default_display_refresh(),
            reminder_interval_secs: default_reminder_interval(),
            change_poll_secs: default_change_poll(),
            log_level: default_log_level(),
            progress_bar_width: default_bar_width(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("classtop")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".classtop")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("classtop.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("classtop.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path).map_err(|_| AppError::ConfigSave)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Keys absent from the YAML file on disk (they silently take defaults).
    pub fn missing_keys(path: &Path) -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;

        let Some(map) = yaml.as_mapping() else {
            return Ok(CONFIG_KEYS.to_vec());
        };

        Ok(CONFIG_KEYS
            .iter()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .copied()
            .collect())
    }

    /// `~` is expanded; relative names live in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    /// Returns the database path the config now points to.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        // Test mode never touches the user's config directory
        if !is_test {
            fs::create_dir_all(&dir)?;
            Self::with_database(db_path.clone()).save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classtop.conf");
        fs::write(&path, "database: /tmp/x.sqlite\ndata_refresh_secs: 30\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.data_refresh_secs, 30);
        assert_eq!(cfg.display_refresh_secs, 1);
        assert_eq!(cfg.reminder_interval_secs, 60);

        let missing = Config::missing_keys(&path).unwrap();
        assert!(missing.contains(&"log_level"));
        assert!(!missing.contains(&"database"));
    }
}
