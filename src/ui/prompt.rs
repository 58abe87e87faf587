//! Interactive prompt contract.
//!
//! App flows ask for host and session selections, command text, and file
//! paths through [`Prompter`], so they can be driven by a scripted prompter
//! in tests. `None` always means the user cancelled.

use std::io;

/// One entry in a pick list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickOption {
    pub label: String,
    /// Dimmed text shown after the label.
    pub description: Option<String>,
}

impl PickOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

pub trait Prompter {
    /// Pick any number of options; returns indices in list order.
    fn pick_many(&mut self, title: &str, options: &[PickOption]) -> io::Result<Option<Vec<usize>>>;
    /// Pick exactly one option.
    fn pick_one(&mut self, title: &str, options: &[PickOption]) -> io::Result<Option<usize>>;
    /// Read one line of text. Empty input takes `default`, or cancels when
    /// there is none.
    fn input(&mut self, title: &str, default: Option<&str>) -> io::Result<Option<String>>;
}
