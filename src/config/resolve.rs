//! Placeholder substitution for configuration values.
//!
//! Two placeholder kinds are recognised inside a value:
//!
//! - `${NAME}` is replaced by the environment variable `NAME`, or by an empty
//!   string when the variable is unset.
//! - `$(key)` or `$(section.key)` is replaced by a value defined earlier in the
//!   same file, looked up with [`Config::get_string`].
//!
//! Environment placeholders are always substituted first, across the whole
//! value, before any local reference is looked at.

use std::sync::LazyLock;

use regex::{Match, Regex};

use super::env::Environment;
use super::{Config, ConfigError};

static ENV_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?\}").unwrap()
});

static LOCAL_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)?\)").unwrap()
});

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Za-z_][A-Za-z0-9_]*)\]$").unwrap());

/// Returns true if `s` is a valid field key.
pub(crate) fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Returns the section name if `line` is a `[name]` header.
pub(crate) fn section_header(line: &str) -> Option<&str> {
    SECTION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Substitutes every placeholder in `value`.
///
/// `${...}` names are passed to `env` verbatim, including any dot, so
/// `${a.b}` asks for a variable literally named `a.b`. `$(...)` references
/// resolve against `config` as populated so far; the first one that cannot be
/// resolved aborts substitution with [`ConfigError::UnresolvedReference`].
pub(crate) fn substitute(
    value: &str,
    line: usize,
    env: &dyn Environment,
    config: &Config,
) -> Result<String, ConfigError> {
    let value = replace_all(&ENV_PLACEHOLDER, value, |name| {
        Ok::<_, ConfigError>(env.var(name).unwrap_or_else(|| {
            tracing::debug!(line, name, "environment variable not set, substituting empty string");
            String::new()
        }))
    })?;

    replace_all(&LOCAL_PLACEHOLDER, &value, |key| {
        config
            .get_string(key)
            .map(str::to_string)
            .map_err(|_| ConfigError::UnresolvedReference {
                line,
                key: key.to_string(),
            })
    })
}

/// Replaces each match of `re` with the result of `f` applied to the text
/// between the placeholder's delimiters. Stops at the first error.
fn replace_all<E>(
    re: &Regex,
    input: &str,
    mut f: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let mut result = String::with_capacity(input.len());
    let mut last = 0;

    for m in re.find_iter(input) {
        result.push_str(&input[last..m.start()]);
        result.push_str(&f(placeholder_name(&m))?);
        last = m.end();
    }

    result.push_str(&input[last..]);
    Ok(result)
}

/// Strips the `${`/`$(` prefix and the closing delimiter.
fn placeholder_name<'h>(m: &Match<'h>) -> &'h str {
    let text = m.as_str();
    &text[2..text.len() - 1]
}
