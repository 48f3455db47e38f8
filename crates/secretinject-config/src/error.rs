//! Conversion errors.

use thiserror::Error;
use yaml_rust2::scanner::ScanError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to parse configuration as yaml: {0}")]
    MalformedDocument(#[from] ScanError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
