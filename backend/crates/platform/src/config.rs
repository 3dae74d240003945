//! Environment Configuration
//!
//! Reads settings through a lookup function instead of `std::env` directly,
//! so configuration can be validated from a map in tests. Every problem is
//! collected and reported together; startup fails on any of them.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// A single invalid or missing setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Configuration validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid environment configuration: {}", join_issues(.0))]
pub struct ConfigError(pub Vec<ConfigIssue>);

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Lookup backed by the process environment
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Collects settings and validation issues from a lookup function
pub struct EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    lookup: F,
    issues: Vec<ConfigIssue>,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(lookup: F) -> Self {
        Self {
            lookup,
            issues: Vec::new(),
        }
    }

    fn issue(&mut self, name: &str, reason: impl Into<String>) {
        self.issues.push(ConfigIssue {
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    /// Raw value; blank counts as unset
    pub fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.trim().is_empty())
    }

    /// Raw value with a default
    pub fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    /// First set variable among `names`
    pub fn first_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.optional(name))
    }

    /// Required non-empty value
    pub fn required(&mut self, name: &str) -> String {
        match self.optional(name) {
            Some(value) => value,
            None => {
                self.issue(name, "Required");
                String::new()
            }
        }
    }

    /// Required URL
    pub fn required_url(&mut self, name: &str) -> Option<Url> {
        match self.optional(name) {
            Some(raw) => self.parse_url(name, &raw),
            None => {
                self.issue(name, "Required");
                None
            }
        }
    }

    /// Optional URL; present but malformed is an issue
    pub fn optional_url(&mut self, name: &str) -> Option<Url> {
        let raw = self.optional(name)?;
        self.parse_url(name, &raw)
    }

    fn parse_url(&mut self, name: &str, raw: &str) -> Option<Url> {
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                self.issue(name, format!("Invalid url ({e})"));
                None
            }
        }
    }

    /// Boolean flag accepting only `true` / `false`; unset is `false`
    pub fn flag(&mut self, name: &str) -> bool {
        match self.optional(name).as_deref() {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                self.issue(name, format!("expected \"true\" or \"false\", got \"{other}\""));
                false
            }
        }
    }

    /// Parsed value with a default
    pub fn parsed<T>(&mut self, name: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.optional(name) {
            None => default,
            Some(raw) => match raw.trim().parse() {
                Ok(value) => value,
                Err(e) => {
                    self.issue(name, format!("invalid value \"{raw}\" ({e})"));
                    default
                }
            },
        }
    }

    /// Finish reading; any recorded issue fails the whole configuration
    pub fn finish(self) -> Result<(), ConfigError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError(self.issues))
        }
    }
}
