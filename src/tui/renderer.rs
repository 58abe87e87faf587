//! Status-line renderer for stderr.

use crossterm::style::Stylize;

use crate::tui::settings;

/// Handles all terminal output formatting.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Whether ANSI color/style output is enabled.
    color: bool,
}

impl Renderer {
    /// Create a renderer with optional color output.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Print a warning (to stderr).
    pub fn warn(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_WARNING.with(settings::COLOR_WARNING).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_WARNING);
        }
    }

    /// Print a small section header in status-style output.
    pub fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                title.with(settings::COLOR_SECTION_TITLE).bold()
            );
        } else {
            eprintln!("{title}:");
        }
    }

    /// Print an activity line for launch/dispatch progress.
    pub fn activity(&self, text: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                settings::GLYPH_SECTION_BULLET.with(settings::COLOR_SECTION_BULLET),
                text.with(settings::COLOR_ACTIVITY_TEXT).bold()
            );
        } else {
            eprintln!("{text}");
        }
    }

    /// Print a key/value line under a status section.
    pub fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{}{} {}",
                settings::INDENT_1,
                format!("{key}:").with(settings::COLOR_FIELD_KEY),
                value.with(settings::COLOR_FIELD_VALUE),
            );
        } else {
            eprintln!("{}{key}: {value}", settings::INDENT_1);
        }
    }

    /// Print a simple indented detail line.
    pub fn detail(&self, text: &str) {
        if self.color {
            eprintln!(
                "{}{}",
                settings::INDENT_1,
                text.with(settings::COLOR_FIELD_VALUE)
            );
        } else {
            eprintln!("{}{text}", settings::INDENT_1);
        }
    }

    /// Print an error (to stderr).
    pub fn error(&self, msg: &str) {
        if self.color {
            eprintln!(
                "{} {msg}",
                settings::LABEL_ERROR.with(settings::COLOR_ERROR).bold()
            );
        } else {
            eprintln!("{} {msg}", settings::LABEL_ERROR);
        }
    }
}
