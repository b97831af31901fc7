use crate::errors::{AppError, AppResult};
use crate::utils::path::{ensure_parent_dir, expand_tilde};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_input_dir")]
    pub input_dir: String,
    #[serde(default = "default_output_file")]
    pub output_file: String,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    #[serde(default = "default_excluded_departments")]
    pub excluded_departments: Vec<String>,
    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,
    /// Year rows must fall in; `None` means the current calendar year.
    #[serde(default)]
    pub reference_year: Option<i32>,
    #[serde(default = "default_layoff_threshold")]
    pub layoff_threshold_hours: f64,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_input_dir() -> String {
    "data".to_string()
}
fn default_output_file() -> String {
    "output/transformed_data.csv".to_string()
}
fn default_file_extension() -> String {
    "csv".to_string()
}
fn default_layoff_threshold() -> f64 {
    8.0
}

pub fn default_excluded_departments() -> Vec<String> {
    [
        "Admin",
        "Executive",
        "Facilities",
        "Finance",
        "Human Resources",
        "Information Technology",
        "Manager",
        "Marketing",
        "Pipeline & Development",
        "Reception",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn default_excluded_types() -> Vec<String> {
    vec!["Meal Break".to_string(), "Time Off Unpaid".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            input_dir: default_input_dir(),
            output_file: default_output_file(),
            file_extension: default_file_extension(),
            excluded_departments: default_excluded_departments(),
            excluded_types: default_excluded_types(),
            reference_year: None,
            layoff_threshold_hours: default_layoff_threshold(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rutilization")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rutilization")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rutilization.conf")
    }

    /// Return the full path of the SQLite store
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rutilization.sqlite")
    }

    /// Load configuration from `path` (or the default location).
    /// A missing file yields the defaults; a broken one is an error.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;

        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Write this configuration as YAML to `path`.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let yaml =
            serde_yaml::to_string(self).map_err(|e| AppError::ConfigSave(e.to_string()))?;
        ensure_parent_dir(path)?;
        fs::write(path, yaml).map_err(|e| AppError::ConfigSave(format!("{}: {}", path.display(), e)))
    }

    fn validate(&self) -> AppResult<()> {
        if !self.layoff_threshold_hours.is_finite() || self.layoff_threshold_hours < 0.0 {
            return Err(AppError::Config(format!(
                "layoff_threshold_hours must be a non-negative number, got {}",
                self.layoff_threshold_hours
            )));
        }
        if self.file_extension.trim().is_empty() {
            return Err(AppError::Config("file_extension must not be empty".into()));
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn input_path(&self) -> PathBuf {
        expand_tilde(&self.input_dir)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_tilde(&self.output_file)
    }
}
