use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::env::{Environment, ProcessEnv};
use super::resolve::{is_identifier, section_header, substitute};
use super::section::{trim_blank, Section};
use super::{Config, ConfigError};

/// Loader for flat `key = value` configuration text.
///
/// The format is read one line at a time:
///
/// ```text
/// # Lines starting with '#' are comments
/// foo       = bar
/// workspace = ${PWD}
///
/// [dev]
/// ip   = 127.0.0.1
/// port = 8080
/// url  = $(dev.ip):$(dev.port)
/// ```
///
/// Assignments before the first `[section]` header are top-level fields; every
/// assignment after a header belongs to that section until the next header.
///
/// ## Placeholders
///
/// `${NAME}` is replaced by an environment variable (empty when unset).
/// `$(key)` and `$(section.key)` are replaced by values defined on earlier
/// lines; a reference that cannot be resolved fails the load.
///
/// ## Example
///
/// ```
/// use std::collections::HashMap;
/// use flatconf::{Config, Loader};
///
/// let env = HashMap::from([("HOME".to_string(), "/home/dev".to_string())]);
/// let mut config = Config::new();
///
/// Loader::new()
///     .with_env(env)
///     .load_str(&mut config, "cache = ${HOME}/.cache")?;
///
/// assert_eq!(config.get_string("cache")?, "/home/dev/.cache");
/// # Ok::<(), flatconf::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "loaders do nothing until .load() is called"]
pub struct Loader<E = ProcessEnv> {
    env: E,
}

impl Loader {
    /// Creates a loader that reads `${...}` placeholders from the process environment.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Environment> Loader<E> {
    /// Replaces the source used for `${...}` placeholders.
    pub fn with_env<F: Environment>(self, env: F) -> Loader<F> {
        Loader { env }
    }

    /// Opens `path` and loads it into `config`.
    pub fn load_file(&self, config: &mut Config, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration file");

        let file = File::open(path).map_err(|e| ConfigError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.load(config, file)
    }

    /// Loads configuration text held in memory.
    pub fn load_str(&self, config: &mut Config, text: &str) -> Result<(), ConfigError> {
        self.load(config, text.as_bytes())
    }

    /// Reads `reader` line by line into `config`.
    ///
    /// Stops at the first invalid line, malformed key, unresolved reference or
    /// read failure. Lines applied before the failure are kept.
    pub fn load<R: Read>(&self, config: &mut Config, reader: R) -> Result<(), ConfigError> {
        let mut current: Option<String> = None;
        let mut lines = 0;

        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line_no = index + 1;
            let raw = line.map_err(|e| ConfigError::Read {
                line: line_no,
                source: e,
            })?;
            lines = line_no;

            let line = trim_blank(&raw);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('=') {
                None => {
                    let name = section_header(line).ok_or_else(|| ConfigError::InvalidLine {
                        line: line_no,
                        text: line.to_string(),
                    })?;

                    tracing::debug!(line = line_no, section = name, "entering section");
                    config.insert_section(Section::new(name));
                    current = Some(name.to_string());
                }
                Some((key, value)) => {
                    let key = trim_blank(key);
                    if !is_identifier(key) {
                        return Err(ConfigError::InvalidKey {
                            line: line_no,
                            text: line.to_string(),
                        });
                    }

                    let value = substitute(trim_blank(value), line_no, &self.env, config)?;
                    tracing::trace!(line = line_no, section = ?current, key, "field loaded");

                    match current.as_deref().and_then(|name| config.section_mut(name)) {
                        Some(section) => section.insert(key, value),
                        None => config.insert_field(key, value),
                    };
                }
            }
        }

        tracing::debug!(
            lines,
            fields = config.fields().count(),
            sections = config.sections().count(),
            "configuration loaded"
        );
        Ok(())
    }
}
