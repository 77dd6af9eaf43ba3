use std::{
    fs, io,
    path::{Path, PathBuf},
};

use cpath::algorithms::DEFAULT_MAX_RETRIES;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{constants::base_path, Error};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.toml");

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_strategy: Option<String>,
    #[serde(default)]
    pub default_generator: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub maze_rows: Option<i32>,
    #[serde(default)]
    pub maze_columns: Option<i32>,
    #[serde(default)]
    pub max_retries: Option<usize>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        base_path().join("settings.toml")
    }

    pub fn populate(mut self) -> Self {
        self.default_strategy = Some(self.get_default_strategy());
        self.default_generator = Some(self.get_default_generator());
        self.log_level = Some(self.get_log_level().to_string().to_lowercase());
        self.maze_rows = Some(self.get_maze_rows());
        self.maze_columns = Some(self.get_maze_columns());
        self.max_retries = Some(self.get_max_retries());

        self
    }

    pub fn set_default_strategy(mut self, value: impl Into<String>) -> Self {
        self.default_strategy = Some(value.into());
        self
    }

    pub fn get_default_strategy(&self) -> String {
        self.default_strategy.clone().unwrap_or_else(|| "bfs".into())
    }

    pub fn set_default_generator(mut self, value: impl Into<String>) -> Self {
        self.default_generator = Some(value.into());
        self
    }

    pub fn get_default_generator(&self) -> String {
        self.default_generator
            .clone()
            .unwrap_or_else(|| "ellers".into())
    }

    pub fn set_log_level(mut self, value: LevelFilter) -> Self {
        self.log_level = Some(value.to_string().to_lowercase());
        self
    }

    pub fn get_log_level(&self) -> LevelFilter {
        match self.log_level.as_deref().map(str::parse::<LevelFilter>) {
            None => LevelFilter::Warn,
            Some(Ok(level)) => level,
            Some(Err(_)) => {
                log::warn!("Invalid log level in settings, using warn");
                LevelFilter::Warn
            }
        }
    }

    pub fn set_maze_size(mut self, rows: i32, columns: i32) -> Self {
        self.maze_rows = Some(rows);
        self.maze_columns = Some(columns);
        self
    }

    pub fn get_maze_rows(&self) -> i32 {
        self.maze_rows.unwrap_or(21)
    }

    pub fn get_maze_columns(&self) -> i32 {
        self.maze_columns.unwrap_or(21)
    }

    pub fn get_max_retries(&self) -> usize {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn from_toml(content: &str) -> Result<Self, Error> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the settings, creating the file from the defaults if it does not exist yet.
    pub fn load(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating default settings at {}", path.display());
                Self::reset_config(path)?;
                Self::from_toml(DEFAULT_SETTINGS)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
