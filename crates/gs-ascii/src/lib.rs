//! ASCII conversion engine for gifscii.
//!
//! Converts raster frames to character grids and builds the animation cache.

pub mod cache;
pub mod fit;
pub mod luminance;
pub mod resize;

pub use cache::{AnimationCache, build_cache, build_cache_parallel};
pub use fit::{CellSize, fit_dimensions};
pub use luminance::{AsciiConverter, convert};
