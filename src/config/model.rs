use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::builder::Loader;
use super::section::Section;
use super::ConfigError;

/// An in-memory configuration: top-level fields plus named sections.
///
/// Every value is kept as the raw string read from the file (after placeholder
/// substitution). Typed getters interpret it on each call.
///
/// ## Example
///
/// ```
/// use flatconf::Config;
///
/// let config: Config = "
/// name = demo
///
/// [server]
/// host = 127.0.0.1
/// port = 8080
/// url  = http://$(server.host):$(server.port)
/// "
/// .parse()?;
///
/// assert_eq!(config.get_string("name")?, "demo");
/// assert_eq!(config.get_int("server.port")?, 8080);
/// assert_eq!(config.get_string("server.url")?, "http://127.0.0.1:8080");
/// # Ok::<(), flatconf::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    fields: HashMap<String, String>,
    sections: HashMap<String, Section>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads fields from a reader, substituting `${...}` from the process environment.
    ///
    /// Keys already present are overwritten. On error, lines before the
    /// failing one remain applied.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), ConfigError> {
        Loader::new().load(self, reader)
    }

    /// Opens `path` and loads it with [`load`](Self::load).
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        Loader::new().load_file(self, path)
    }

    /// Loads fields from an in-memory string.
    pub fn load_str(&mut self, text: &str) -> Result<(), ConfigError> {
        Loader::new().load_str(self, text)
    }

    /// Returns a string value.
    ///
    /// The key may be a plain field name or `<section>.<key>`. A dotted key whose
    /// first part names no section is looked up whole among the top-level
    /// fields.
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        if let Some((name, rest)) = key.split_once('.') {
            if let Some(section) = self.sections.get(name) {
                return section.get_string(rest);
            }
        }

        self.fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::InvalidPath(key.to_string()))
    }

    /// Returns an integer value, resolving `key` like [`get_string`](Self::get_string).
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        if let Some((name, rest)) = key.split_once('.') {
            if let Some(section) = self.sections.get(name) {
                return section.get_int(rest);
            }
        }

        let value = self
            .fields
            .get(key)
            .ok_or_else(|| ConfigError::InvalidPath(key.to_string()))?;
        value
            .parse()
            .map_err(|e| ConfigError::parse_int(value, e))
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.get_mut(name)
    }

    /// Iterates over all sections in arbitrary order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    /// Iterates over the top-level fields in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Stores a top-level field without validating the key.
    pub fn insert_field(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    /// Registers a section, replacing any section with the same name.
    pub fn insert_section(&mut self, section: Section) -> Option<Section> {
        self.sections.insert(section.name().to_string(), section)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut config = Config::new();
        config.load_str(s)?;
        Ok(config)
    }
}
