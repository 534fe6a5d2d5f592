use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    pub username: String,
    pub password: String,
    pub host: String,
    #[serde(default = "default_use_tls")]
    pub use_tls: bool,
    pub employee_id: i64,
    #[serde(default)]
    pub default_department: i64,
}

fn default_use_tls() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            username: "USERNAME".to_string(),
            password: "PASSWORD".to_string(),
            host: "infrastructuretime".to_string(),
            use_tls: default_use_tls(),
            employee_id: 0,
            default_department: 0,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
            appdata.join("timecard")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".timecard")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timecard.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timecard.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Write the current configuration to disk.
    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir())?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("cannot serialize config: {}", e)))?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files. Returns true when a
    /// fresh config file was written (the user still has to fill in the
    /// credentials before anything remote will work).
    pub fn init_all(&self, write_config: bool) -> AppResult<bool> {
        fs::create_dir_all(Self::config_dir())?;

        let mut wrote = false;
        if write_config && !Self::config_file().exists() {
            self.save()?;
            wrote = true;
        }

        let db_path = PathBuf::from(&self.database);
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        Ok(wrote)
    }
}
