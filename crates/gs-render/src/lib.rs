//! Terminal rendering for gifscii.
//!
//! Provides the terminal renderer, centering and terminal bounds.

pub mod canvas;

pub use canvas::{TerminalRenderer, center_line, terminal_bounds};
