//! ## Logging setup driven by environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: "trace", "debug", "info" (default), "warn" or "error"
//! - LOG_DATA_DIR: directory of the log files in file mode (default "./logs")
//! - LOG_MAX_SIZE: size in bytes after which a new file is started (default 1GB)
//!
//! In file mode the log goes to `relay-coordinator-{date}.{n}.log`: a new file
//! every UTC day, and a new sequence number whenever the current one grows
//! past LOG_MAX_SIZE.

use chrono::Utc;
use eyre::{eyre, Result, WrapErr};
use log::info;
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use std::{
    env,
    fs::{create_dir_all, metadata, OpenOptions},
    path::{Path, PathBuf},
};

const LOG_FILE_NAME: &str = "relay-coordinator.log";
const DEFAULT_LOG_MAX_SIZE: u64 = 1_073_741_824;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stdout,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub mode: LogMode,
    pub level: LevelFilter,
    pub data_dir: PathBuf,
    pub max_size: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::Stdout,
            level: LevelFilter::Info,
            data_dir: PathBuf::from("./logs"),
            max_size: DEFAULT_LOG_MAX_SIZE,
        }
    }
}

impl LogConfig {
    /// Unknown modes and levels fall back to the defaults; a malformed
    /// LOG_MAX_SIZE is an error.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let mode = match env::var("LOG_MODE").map(|mode| mode.to_lowercase()) {
            Ok(mode) if mode == "file" => LogMode::File,
            _ => LogMode::Stdout,
        };
        let level = env::var("LOG_LEVEL")
            .map(|level| parse_level(&level))
            .unwrap_or(defaults.level);
        let data_dir = env::var("LOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let max_size = match env::var("LOG_MAX_SIZE") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| eyre!("LOG_MAX_SIZE must be a valid u64 if set, got {value}"))?,
            Err(_) => defaults.max_size,
        };

        Ok(Self {
            mode,
            level,
            data_dir,
            max_size,
        })
    }

    pub fn base_file_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// `dir/name.log` becomes `dir/name-{date}.{index}.log`.
pub fn rolled_file_path(base_file_path: &Path, date: &str, index: u32) -> PathBuf {
    let stem = base_file_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    base_file_path.with_file_name(format!("{stem}-{date}.{index}.log"))
}

/// First rolled file for `date` that is absent or not larger than `max_size`.
pub fn next_log_file_path(base_file_path: &Path, date: &str, max_size: u64) -> PathBuf {
    let mut index = 1;
    let mut path = rolled_file_path(base_file_path, date, index);
    while let Ok(existing) = metadata(&path) {
        if existing.len() <= max_size {
            break;
        }
        index += 1;
        path = rolled_file_path(base_file_path, date, index);
    }
    path
}

/// Installs the global logger. Fails if a logger is already installed.
pub fn setup_logging() -> Result<()> {
    let config = LogConfig::from_env()?;
    init_logger(&config)?;
    info!("Logging is successfully configured (mode: {:?})", config.mode);
    Ok(())
}

pub fn init_logger(config: &LogConfig) -> Result<()> {
    match config.mode {
        LogMode::Stdout => SimpleLogger::init(config.level, Config::default())
            .wrap_err("Failed to initialize stdout logger"),
        LogMode::File => {
            create_dir_all(&config.data_dir).wrap_err_with(|| {
                format!("Failed to create log directory {}", config.data_dir.display())
            })?;
            let date = Utc::now().format("%Y-%m-%d").to_string();
            let path = next_log_file_path(&config.base_file_path(), &date, config.max_size);
            let log_file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .wrap_err_with(|| format!("Unable to open log file {}", path.display()))?;
            WriteLogger::init(config.level, Config::default(), log_file)
                .wrap_err("Failed to initialize file logger")
        }
    }
}
