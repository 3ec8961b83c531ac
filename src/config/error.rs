//! Error types for configuration validation.
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid relay url: {0}")]
    InvalidUrl(String),
    #[error("Invalid address for {field}: {value}")]
    InvalidAddress { field: String, value: String },
    #[error("Invalid slice size: {0}")]
    InvalidSliceSize(usize),
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(u64),
}
