//! Terminal user-interface building blocks.
//!
//! Styling constants, the stderr renderer, and the line-based pickers are
//! kept apart so output look and input handling can change independently.

pub mod picker;
pub mod renderer;
pub mod settings;

pub use picker::{parse_selection, LinePrompter};
pub use renderer::Renderer;
