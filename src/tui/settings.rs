//! Centralized, hardcoded UI settings for the terminal interface.
//!
//! This is the single place to tweak labels, glyphs, colors, and indentation.

use crossterm::style::Color;

// ---------------------------------------------------------------------------
// Layout / indentation
// ---------------------------------------------------------------------------

pub const INDENT_1: &str = "  ";
pub const INDENT_2: &str = "    ";

// ---------------------------------------------------------------------------
// Prompt strings
// ---------------------------------------------------------------------------

pub const PROMPT_PICK_MANY: &str = "pick (numbers, ranges like 2-4, `all`; empty to cancel): ";
pub const PROMPT_PICK_ONE: &str = "pick (empty to cancel): ";
pub const PROMPT_INPUT_DEFAULT_OPEN: &str = " [";
pub const PROMPT_INPUT_DEFAULT_CLOSE: &str = "]";
pub const PROMPT_INPUT_SUFFIX: &str = ": ";
pub const PICK_ALL_KEYWORDS: [&str; 2] = ["all", "*"];

// ---------------------------------------------------------------------------
// Sections / labels
// ---------------------------------------------------------------------------

pub const LABEL_WARNING: &str = "warning:";
pub const LABEL_ERROR: &str = "error:";
pub const GLYPH_SECTION_BULLET: &str = "•";

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_SECTION_BULLET: Color = Color::DarkGrey;
pub const COLOR_SECTION_TITLE: Color = Color::Cyan;
pub const COLOR_ACTIVITY_TEXT: Color = Color::DarkGrey;
pub const COLOR_FIELD_KEY: Color = Color::DarkGrey;
pub const COLOR_FIELD_VALUE: Color = Color::White;

pub const COLOR_PICK_INDEX: Color = Color::DarkYellow;
pub const COLOR_PICK_LABEL: Color = Color::White;
pub const COLOR_PICK_DESCRIPTION: Color = Color::DarkGrey;
pub const COLOR_PROMPT: Color = Color::Green;
