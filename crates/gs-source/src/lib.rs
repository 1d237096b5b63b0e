//! Frame decoders for gifscii (native `image` decoding, ffmpeg subprocess).

pub mod ffmpeg;
pub mod image;

pub use ffmpeg::FfmpegDecoder;
pub use image::NativeDecoder;

use gs_core::config::DecoderKind;
use gs_core::traits::FrameDecoder;

/// Instancie le décodeur choisi par la configuration.
///
/// # Example
/// ```
/// use gs_core::config::DecoderKind;
/// let _decoder = gs_source::decoder_for(DecoderKind::Native);
/// ```
#[must_use]
pub fn decoder_for(kind: DecoderKind) -> Box<dyn FrameDecoder> {
    match kind {
        DecoderKind::Native => Box::new(NativeDecoder::new()),
        DecoderKind::Ffmpeg => Box::new(FfmpegDecoder::new()),
    }
}
