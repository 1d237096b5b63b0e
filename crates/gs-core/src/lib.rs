//! Types partagés, traits et configuration pour gifscii.
//!
//! This crate contains the frame types, the character ramp, the error
//! taxonomy and the decoder/renderer seams used across the workspace.

pub mod cancel;
pub mod charset;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod traits;

pub use cancel::CancelToken;
pub use charset::{CharacterRamp, LuminanceLut};
pub use config::PlayerConfig;
pub use diagnostics::{Diagnostics, LogDiagnostics, MemoryDiagnostics};
pub use error::CoreError;
pub use frame::{AsciiFrame, RasterFrame};
pub use traits::{FrameDecoder, FrameResult, Renderer};
