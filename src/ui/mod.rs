//! Unified terminal-facing UI facade.
//!
//! Orchestration code depends on `ui` for its rendering and prompting
//! contracts; the terminal implementations live in `crate::tui`.

pub mod prompt;
pub mod render;

pub use prompt::{PickOption, Prompter};
pub use render::{RenderSink, Renderer};
