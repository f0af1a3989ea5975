use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("bundled properties resource not found: {0}")]
    ResourceNotFound(String),

    #[error("required properties file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read properties file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed properties in '{resource}' at line {line}: {message}")]
    ParseError {
        resource: String,
        line: usize,
        message: String,
    },

    #[error("failed to parse endpoint overrides '{path}': {source}")]
    OverrideParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing required key '{key}': {description} should be specified")]
    MissingKey {
        key: String,
        description: &'static str,
    },
}
