//! Host entry validation and conversion into launchable targets.
//!
//! Validation collects every problem across the whole list so the caller can
//! show all of them in one message.

use std::fmt;

use crate::config::HostEntry;
use crate::types::{AuthMode, Target};

/// Placeholder used in messages when an entry has no name.
pub const UNNAMED_HOST: &str = "?";

/// Field that a host entry is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Name,
    Address,
    Username,
    Password,
}

impl MissingField {
    /// Config-file key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "host",
            Self::Username => "username",
            Self::Password => "password",
        }
    }
}

/// One missing field on one host entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Entry name, or [`UNNAMED_HOST`].
    pub target: String,
    pub field: MissingField,
}

impl ValidationError {
    pub fn new(target: impl Into<String>, field: MissingField) -> Self {
        Self {
            target: target.into(),
            field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no {} for {}", self.field.key(), self.target)
    }
}

fn present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Validate host entries in list order.
///
/// Checks name, address, username, then password (skipped when the entry
/// uses key auth). Returns an empty list iff every entry is valid.
pub fn validate(entries: &[HostEntry]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for entry in entries {
        let label = if present(entry.name.as_deref()) {
            entry.name.clone().unwrap_or_default()
        } else {
            errors.push(ValidationError::new(UNNAMED_HOST, MissingField::Name));
            UNNAMED_HOST.to_string()
        };
        if !present(entry.host.as_deref()) {
            errors.push(ValidationError::new(&label, MissingField::Address));
        }
        if !present(entry.username.as_deref()) {
            errors.push(ValidationError::new(&label, MissingField::Username));
        }
        if !entry.uses_key() && entry.password.is_none() {
            errors.push(ValidationError::new(&label, MissingField::Password));
        }
    }
    errors
}

/// Convert entries into targets, or return every validation error.
pub fn targets_from_entries(entries: &[HostEntry]) -> Result<Vec<Target>, Vec<ValidationError>> {
    let errors = validate(entries);
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(entries
        .iter()
        .map(|entry| Target {
            name: entry.name.clone().unwrap_or_default(),
            address: entry.host.clone().unwrap_or_default(),
            username: entry.username.clone().unwrap_or_default(),
            auth: if entry.uses_key() {
                AuthMode::Key
            } else {
                AuthMode::Password(entry.password.clone().unwrap_or_default())
            },
            session: None,
        })
        .collect())
}
