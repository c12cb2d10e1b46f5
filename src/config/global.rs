//! Process-wide default configuration.
//!
//! Convenience functions operating on a single shared [`Config`], created empty
//! on first use. A load holds the write lock for the whole parse, so readers on
//! other threads see either the state before the load or after it. Code that
//! can pass a [`Config`] around explicitly should prefer doing so.

use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use parking_lot::RwLock;

use super::{Config, ConfigError};

static DEFAULT: LazyLock<RwLock<Config>> = LazyLock::new(|| RwLock::new(Config::new()));

/// Loads configuration text into the default instance.
pub fn load<R: Read>(reader: R) -> Result<(), ConfigError> {
    DEFAULT.write().load(reader)
}

/// Loads a configuration file into the default instance.
pub fn load_file(path: impl AsRef<Path>) -> Result<(), ConfigError> {
    DEFAULT.write().load_file(path)
}

/// Returns a string value from the default instance.
pub fn get_string(key: &str) -> Result<String, ConfigError> {
    DEFAULT.read().get_string(key).map(str::to_string)
}

/// Returns an integer value from the default instance.
pub fn get_int(key: &str) -> Result<i64, ConfigError> {
    DEFAULT.read().get_int(key)
}

/// Runs `f` with shared access to the default instance.
///
/// Loading from inside `f` deadlocks.
pub fn with<T>(f: impl FnOnce(&Config) -> T) -> T {
    f(&DEFAULT.read())
}

/// Discards everything loaded into the default instance.
pub fn reset() {
    *DEFAULT.write() = Config::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every test touching the shared instance lives here so they never interleave.
    #[test]
    fn test_default_instance() {
        reset();

        load("foo = bar\na = 1\n[dev]\nport = 8080\nid_list = [1, 2]\n".as_bytes()).unwrap();
        assert_eq!(get_string("foo").unwrap(), "bar");
        assert_eq!(get_int("a").unwrap(), 1);
        assert_eq!(get_int("dev.port").unwrap(), 8080);
        let ids = with(|config| config.section("dev").map(|s| s.get_ints("id_list")));
        assert_eq!(ids.unwrap().unwrap(), [1, 2]);

        // A later load sees earlier keys and overwrites in place.
        load("b = $(foo)-2\na = 5".as_bytes()).unwrap();
        assert_eq!(get_string("b").unwrap(), "bar-2");
        assert_eq!(get_int("a").unwrap(), 5);

        let err = load("c = $(missing)".as_bytes()).unwrap_err();
        assert!(err.is_invalid_key());
        assert!(get_string("c").is_err());

        assert!(matches!(
            load_file("/nonexistent/path/app.conf"),
            Err(ConfigError::Open { .. })
        ));

        reset();
        assert!(get_string("foo").is_err());
    }
}
