use crate::core::calculator::time_blocks::BlockPolicy;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // missing-key detection and write-back

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_school_prefix")]
    pub school_prefix: String,
    #[serde(default = "default_program_code")]
    pub default_program_code: String,
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default = "default_preflight")]
    pub preflight_minutes: i64,
    #[serde(default)]
    pub prebrief_minutes: i64,
    #[serde(default = "default_postflight")]
    pub postflight_minutes: i64,
    #[serde(default)]
    pub ground_postbrief_minutes: i64,
    #[serde(default)]
    pub allow_cross_midnight: bool,
}

fn default_school_prefix() -> String {
    "DSA".to_string()
}
fn default_program_code() -> String {
    "PPC".to_string()
}
fn default_start_time() -> String {
    "07:00".to_string()
}
fn default_preflight() -> i64 {
    30
}
fn default_postflight() -> i64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    fn with_database(database: String) -> Self {
        Self {
            database,
            school_prefix: default_school_prefix(),
            default_program_code: default_program_code(),
            default_start_time: default_start_time(),
            preflight_minutes: default_preflight(),
            prebrief_minutes: 0,
            postflight_minutes: default_postflight(),
            ground_postbrief_minutes: 0,
            allow_cross_midnight: false,
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("flightdesk")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".flightdesk")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("flightdesk.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("flightdesk.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Time-block durations derived from the configured minutes.
    pub fn block_policy(&self) -> BlockPolicy {
        BlockPolicy {
            preflight_minutes: self.preflight_minutes,
            prebrief_minutes: self.prebrief_minutes,
            postflight_minutes: self.postflight_minutes,
            ground_postbrief_minutes: self.ground_postbrief_minutes,
            allow_cross_midnight: self.allow_cross_midnight,
        }
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Self::with_database(db_path.to_string_lossy().to_string());
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path)
    }
}
