use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use gs_core::error::CoreError;
use gs_core::frame::RasterFrame;
use gs_core::traits::{FrameDecoder, FrameResult};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageDecoder};

/// Décodeur in-process basé sur le crate `image`.
///
/// `.gif` : toutes les frames de l'animation, déjà composées (RGBA plein
/// cadre). Autres formats : une seule frame.
///
/// # Example
/// ```no_run
/// use gs_core::traits::FrameDecoder;
/// use gs_source::image::NativeDecoder;
/// use std::path::Path;
/// let frames = NativeDecoder::new().decode(Path::new("gifs/gif.gif")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct NativeDecoder;

impl NativeDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

impl FrameDecoder for NativeDecoder {
    fn decode(&mut self, path: &Path) -> Result<Vec<FrameResult>, CoreError> {
        if is_gif(path) {
            decode_gif(path)
        } else {
            load_image(path).map(|frame| vec![Ok(frame)])
        }
    }
}

fn decode_gif(path: &Path) -> Result<Vec<FrameResult>, CoreError> {
    let file = File::open(path).map_err(|e| CoreError::unreadable(path, e))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|e| CoreError::unreadable(path, e))?;

    let (width, height) = decoder.dimensions();
    if width == 0 || height == 0 {
        return Err(CoreError::unreadable(
            path,
            format!("dimensions dégénérées {width}×{height}"),
        ));
    }

    let mut frames = Vec::new();
    for (index, frame) in decoder.into_frames().enumerate() {
        match frame {
            Ok(frame) => {
                let buffer = frame.into_buffer();
                let (w, h) = buffer.dimensions();
                frames.push(RasterFrame::from_rgba(w, h, buffer.into_raw()));
            }
            Err(e) => {
                // Le flux LZW ne se resynchronise pas : on garde ce qui précède.
                log::debug!("decode_gif: flux interrompu à la frame {}: {e}", index + 1);
                frames.push(Err(CoreError::FrameConversion {
                    index,
                    reason: e.to_string(),
                }));
                break;
            }
        }
    }

    log::info!("decode_gif: {} frames — {}", frames.len(), path.display());
    Ok(frames)
}

/// Charge une image fixe en frame RGBA.
///
/// # Errors
/// [`CoreError::SourceUnreadable`] if the file is missing, corrupt or has a
/// zero dimension.
///
/// # Example
/// ```no_run
/// use gs_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("frame_0001.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<RasterFrame, CoreError> {
    let img = image::open(path).map_err(|e| CoreError::unreadable(path, e))?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    RasterFrame::from_rgba(w, h, rgba.into_raw()).map_err(|e| CoreError::unreadable(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, Rgba, RgbaImage};

    fn write_gif(path: &Path, shades: &[u8]) {
        let file = File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        let frames = shades.iter().map(|&v| {
            let img = RgbaImage::from_pixel(6, 4, Rgba([v, v, v, 255]));
            Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(40, 1))
        });
        encoder.encode_frames(frames).unwrap();
    }

    #[test]
    fn decodes_every_gif_frame_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anim.gif");
        write_gif(&path, &[0, 255, 0]);

        let frames = NativeDecoder::new().decode(&path).unwrap();
        assert_eq!(frames.len(), 3);
        let frames: Vec<RasterFrame> = frames.into_iter().map(Result::unwrap).collect();
        assert!(frames.iter().all(|f| f.width() == 6 && f.height() == 4));
        assert_eq!(frames[0].luminance(0, 0), 0);
        assert_eq!(frames[1].luminance(0, 0), 255);
    }

    #[test]
    fn still_image_is_a_single_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");
        RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]))
            .save(&path)
            .unwrap();
        let frames = NativeDecoder::new().decode(&path).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn missing_file_is_source_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = NativeDecoder::new()
            .decode(&dir.path().join("absent.gif"))
            .unwrap_err();
        assert!(matches!(err, CoreError::SourceUnreadable { .. }));
    }

    #[test]
    fn garbage_gif_is_source_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.gif");
        std::fs::write(&path, b"definitely not a gif").unwrap();
        assert!(matches!(
            NativeDecoder::new().decode(&path),
            Err(CoreError::SourceUnreadable { .. })
        ));
    }
}
