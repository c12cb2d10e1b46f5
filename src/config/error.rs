use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to open config file '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },

    #[error("invalid line: {line} {text}")]
    InvalidLine { line: usize, text: String },

    #[error("invalid key: {line} {text}")]
    InvalidKey { line: usize, text: String },

    #[error("invalid key: {line} {key}")]
    UnresolvedReference { line: usize, key: String },

    #[error("invalid key: {0}")]
    InvalidPath(String),

    #[error("unknown key: {0}")]
    UnknownKey(String),

    #[error("wrong type for '{key}': {value}")]
    WrongType { key: String, value: String },

    #[error("invalid integer '{value}': {source}")]
    ParseInt {
        value: String,
        source: ParseIntError,
    },
}

impl ConfigError {
    /// Whether this error is one of the "invalid key" failures: a malformed
    /// assignment key, an unresolved `$(...)` reference, or a top-level lookup
    /// that matched nothing.
    pub fn is_invalid_key(&self) -> bool {
        matches!(
            self,
            Self::InvalidKey { .. } | Self::UnresolvedReference { .. } | Self::InvalidPath(_)
        )
    }

    pub(crate) fn parse_int(value: &str, source: ParseIntError) -> Self {
        Self::ParseInt {
            value: value.to_string(),
            source,
        }
    }
}
