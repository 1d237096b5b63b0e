//! Application layer for gifscii: CLI, startup pipeline and playback controller.

pub mod cli;
pub mod input;
pub mod pipeline;
pub mod player;
