use dotenv::dotenv;
use dotenv::from_path;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DATA_DIR: &str = "App_Data";
pub const DEFAULT_EMPLOYEES_FILE: &str = "employees.json";
pub const DEFAULT_DEPARTMENTS_FILE: &str = "departments.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load .env file from path {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub employees_file: String,
    pub departments_file: String,
    pub page_size: usize,
    pub recent_hire_days: i64,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            employees_file: DEFAULT_EMPLOYEES_FILE.to_string(),
            departments_file: DEFAULT_DEPARTMENTS_FILE.to_string(),
            page_size: 10,
            recent_hire_days: 30,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a specified `.env` file path or the optional root `.env` file.
    pub fn from_env(env_path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            from_path(path).map_err(|source| ConfigError::EnvFile {
                path: path.to_string(),
                source,
            })?;
        } else {
            dotenv().ok();
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "PAGE_SIZE",
                        value: raw,
                    })
                }
            },
            None => defaults.page_size,
        };

        let recent_hire_days = match lookup("RECENT_HIRE_DAYS") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(days) if days >= 0 => days,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "RECENT_HIRE_DAYS",
                        value: raw,
                    })
                }
            },
            None => defaults.recent_hire_days,
        };

        Ok(Self {
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            employees_file: lookup("EMPLOYEES_FILE").unwrap_or(defaults.employees_file),
            departments_file: lookup("DEPARTMENTS_FILE").unwrap_or(defaults.departments_file),
            page_size,
            recent_hire_days,
            log_filter: lookup("LOG_FILTER").unwrap_or(defaults.log_filter),
        })
    }

    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }

    pub fn departments_path(&self) -> PathBuf {
        self.data_dir.join(&self.departments_file)
    }
}
