//! Named groups of fields introduced by a `[name]` header.

use std::collections::HashMap;

use super::ConfigError;

/// A named group of raw string fields.
///
/// Values are stored exactly as they appeared after placeholder substitution;
/// integer and list interpretation happens only when a typed getter is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    fields: HashMap<String, String>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stores a field, returning the previous value if the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterates over the raw fields in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the raw value stored under `key`.
    pub fn get_string(&self, key: &str) -> Result<&str, ConfigError> {
        self.fields
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
    }

    /// Returns the value under `key` parsed as a base-10 integer.
    pub fn get_int(&self, key: &str) -> Result<i64, ConfigError> {
        let value = self.get_string(key)?;
        value
            .parse()
            .map_err(|e| ConfigError::parse_int(value, e))
    }

    /// Returns the elements of a `[a, b, c]` list value.
    ///
    /// Elements are split on `,` and trimmed of spaces and tabs. An empty list
    /// literal `[]` yields a single empty element.
    pub fn get_strings(&self, key: &str) -> Result<Vec<&str>, ConfigError> {
        Ok(self.list_items(key)?.collect())
    }

    /// Returns the elements of a `[1, 2, 3]` list value parsed as integers.
    ///
    /// Stops at the first element that is not a valid integer.
    pub fn get_ints(&self, key: &str) -> Result<Vec<i64>, ConfigError> {
        self.list_items(key)?
            .map(|item| item.parse().map_err(|e| ConfigError::parse_int(item, e)))
            .collect()
    }

    fn list_items(&self, key: &str) -> Result<impl Iterator<Item = &str>, ConfigError> {
        let value = self.get_string(key)?;
        let inner = value
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| ConfigError::WrongType {
                key: key.to_string(),
                value: value.to_string(),
            })?;

        Ok(inner.split(',').map(trim_blank))
    }
}

/// Trims the spaces and tabs that the file format treats as insignificant.
pub(crate) fn trim_blank(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_section() -> Section {
        let mut section = Section::new("Test");
        section.insert("ip", "192.168.1.1");
        section.insert("port", "8080");
        section.insert("id_list", "[1, 2, 3, 4]");
        section
    }

    #[test]
    fn test_get_string() {
        let section = test_section();
        assert_eq!(section.get_string("ip").unwrap(), "192.168.1.1");
        assert_eq!(section.name(), "Test");
    }

    #[test]
    fn test_get_int() {
        let section = test_section();
        assert_eq!(section.get_int("port").unwrap(), 8080);
    }

    #[test]
    fn test_get_int_not_a_number() {
        let section = test_section();
        let result = section.get_int("ip");
        assert!(matches!(result, Err(ConfigError::ParseInt { ref value, .. }) if value == "192.168.1.1"));
    }

    #[test]
    fn test_unknown_key() {
        let section = test_section();
        assert!(matches!(section.get_string("host"), Err(ConfigError::UnknownKey(k)) if k == "host"));
        assert!(matches!(section.get_int("host"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(section.get_strings("host"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(section.get_ints("host"), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_get_strings() {
        let section = test_section();
        assert_eq!(section.get_strings("id_list").unwrap(), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_get_ints() {
        let section = test_section();
        assert_eq!(section.get_ints("id_list").unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_list_elements_trimmed_of_tabs() {
        let mut section = Section::new("lists");
        section.insert("names", "[alpha,\tbeta ,  gamma delta ]");
        assert_eq!(
            section.get_strings("names").unwrap(),
            ["alpha", "beta", "gamma delta"]
        );
    }

    #[test]
    fn test_empty_list_yields_single_empty_element() {
        let mut section = Section::new("lists");
        section.insert("empty", "[]");
        assert_eq!(section.get_strings("empty").unwrap(), [""]);
        assert!(matches!(section.get_ints("empty"), Err(ConfigError::ParseInt { .. })));
    }

    #[test]
    fn test_list_without_brackets_is_wrong_type() {
        let mut section = Section::new("lists");
        section.insert("plain", "1, 2, 3");
        section.insert("open", "[1, 2");
        section.insert("lone", "[");

        for key in ["plain", "open", "lone"] {
            assert!(matches!(section.get_strings(key), Err(ConfigError::WrongType { .. })));
            assert!(matches!(section.get_ints(key), Err(ConfigError::WrongType { .. })));
        }
    }

    #[test]
    fn test_get_ints_stops_at_first_bad_element() {
        let mut section = Section::new("lists");
        section.insert("mixed", "[1, two, three]");
        let result = section.get_ints("mixed");
        assert!(matches!(result, Err(ConfigError::ParseInt { ref value, .. }) if value == "two"));
    }

    #[test]
    fn test_reads_are_repeatable() {
        let section = test_section();
        assert_eq!(section.get_ints("id_list").unwrap(), section.get_ints("id_list").unwrap());
        assert_eq!(section.get_string("ip").unwrap(), section.get_string("ip").unwrap());
    }
}
