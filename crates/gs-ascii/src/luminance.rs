use gs_core::charset::{CharacterRamp, LuminanceLut};
use gs_core::diagnostics::Diagnostics;
use gs_core::error::CoreError;
use gs_core::frame::{AsciiFrame, RasterFrame, rgb_luminance};

use crate::fit::fit_dimensions;
use crate::resize::Resizer;

/// Convertisseur réutilisable : LUT de la rampe + resizer pré-alloué.
///
/// # Example
/// ```
/// use gs_ascii::luminance::AsciiConverter;
/// use gs_core::charset::CharacterRamp;
/// use gs_core::diagnostics::MemoryDiagnostics;
/// use gs_core::frame::RasterFrame;
///
/// let mut conv = AsciiConverter::new(&CharacterRamp::default());
/// let frame = RasterFrame::filled(10, 10, [0, 0, 0, 255]);
/// let art = conv.convert(&frame, 10, 10, &MemoryDiagnostics::default()).unwrap();
/// assert_eq!((art.width(), art.height()), (10, 5));
/// assert!(art.cells().iter().all(|&c| c == '@'));
/// ```
pub struct AsciiConverter {
    lut: LuminanceLut,
    resizer: Resizer,
}

impl AsciiConverter {
    #[must_use]
    pub fn new(ramp: &CharacterRamp) -> Self {
        Self {
            lut: LuminanceLut::new(ramp),
            resizer: Resizer::new(),
        }
    }

    /// Convertit une frame raster en grille ASCII tenant dans
    /// `target_width × max_height` cellules.
    ///
    /// # Errors
    /// [`CoreError::InvalidDimensions`] for a zero-sized source,
    /// [`CoreError::FrameConversion`] if resampling fails.
    pub fn convert(
        &mut self,
        frame: &RasterFrame,
        target_width: u32,
        max_height: u32,
        diagnostics: &dyn Diagnostics,
    ) -> Result<AsciiFrame, CoreError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(CoreError::InvalidDimensions {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let size = fit_dimensions(
            frame.width(),
            frame.height(),
            target_width,
            max_height,
            diagnostics,
        );
        let small = self.resizer.resize(frame, size.width, size.height)?;

        let cells = small
            .data()
            .chunks_exact(4)
            .map(|px| self.lut.map(rgb_luminance(px[0], px[1], px[2])))
            .collect();

        AsciiFrame::from_cells(size.width, size.height, cells)
    }
}

/// One-shot conversion. Allocates a fresh resizer; prefer [`AsciiConverter`]
/// for sequences.
///
/// # Errors
/// See [`AsciiConverter::convert`].
///
/// # Example
/// ```
/// use gs_ascii::luminance::convert;
/// use gs_core::charset::CharacterRamp;
/// use gs_core::diagnostics::MemoryDiagnostics;
/// use gs_core::frame::RasterFrame;
///
/// let white = RasterFrame::filled(10, 10, [255, 255, 255, 255]);
/// let art = convert(&white, &CharacterRamp::default(), 10, 10, &MemoryDiagnostics::default()).unwrap();
/// assert!(art.cells().iter().all(|&c| c == ' '));
/// ```
pub fn convert(
    frame: &RasterFrame,
    ramp: &CharacterRamp,
    target_width: u32,
    max_height: u32,
    diagnostics: &dyn Diagnostics,
) -> Result<AsciiFrame, CoreError> {
    AsciiConverter::new(ramp).convert(frame, target_width, max_height, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gs_core::diagnostics::MemoryDiagnostics;

    fn gradient(width: u32, height: u32) -> RasterFrame {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _y in 0..height {
            for x in 0..width {
                let v = (x * 255 / (width - 1)) as u8;
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterFrame::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn solid_black_is_darkest_char() {
        let diag = MemoryDiagnostics::default();
        let ramp = CharacterRamp::new("@%#*+=-:. ").unwrap();
        let black = RasterFrame::filled(10, 10, [0, 0, 0, 255]);
        let art = convert(&black, &ramp, 10, 10, &diag).unwrap();
        assert!(art.cells().iter().all(|&c| c == '@'));
    }

    #[test]
    fn solid_white_is_lightest_char() {
        let diag = MemoryDiagnostics::default();
        let ramp = CharacterRamp::new("@%#*+=-:. ").unwrap();
        let white = RasterFrame::filled(10, 10, [255, 255, 255, 255]);
        let art = convert(&white, &ramp, 10, 10, &diag).unwrap();
        assert!(art.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn output_chars_come_from_ramp_and_grid_is_rectangular() {
        let diag = MemoryDiagnostics::default();
        let ramp = CharacterRamp::new(" .:-=+*#%@").unwrap();
        let mut conv = AsciiConverter::new(&ramp);
        let art = conv.convert(&gradient(256, 64), 60, 30, &diag).unwrap();
        assert!(art.cells().iter().all(|c| ramp.chars().contains(c)));
        assert!(art.rows().all(|r| r.len() == art.width() as usize));
        assert_eq!(art.rows().count(), art.height() as usize);
    }

    #[test]
    fn two_tone_frame_keeps_its_halves() {
        let diag = MemoryDiagnostics::default();
        let ramp = CharacterRamp::default();
        let mut data = Vec::new();
        for _y in 0..20 {
            for x in 0..200 {
                let v = if x < 100 { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let frame = RasterFrame::from_rgba(200, 20, data).unwrap();
        let art = convert(&frame, &ramp, 40, 20, &diag).unwrap();
        let row = art.row(art.height() / 2);
        assert_eq!(row[0], ramp.darkest());
        assert_eq!(row[row.len() - 1], ramp.lightest());
    }

    #[test]
    fn respects_height_budget() {
        let diag = MemoryDiagnostics::default();
        let tall = RasterFrame::filled(20, 400, [128, 128, 128, 255]);
        let art = convert(&tall, &CharacterRamp::default(), 75, 15, &diag).unwrap();
        assert!(art.height() <= 15 && art.height() >= 1);
    }

    #[test]
    fn very_wide_frame_warns_and_keeps_one_row() {
        let diag = MemoryDiagnostics::default();
        let wide = RasterFrame::filled(400, 2, [0, 0, 0, 255]);
        let art = convert(&wide, &CharacterRamp::default(), 50, 10, &diag).unwrap();
        assert_eq!(art.height(), 1);
        assert_eq!(diag.warnings().len(), 1);
    }

    #[test]
    fn converter_is_reusable_across_sizes() {
        let diag = MemoryDiagnostics::default();
        let mut conv = AsciiConverter::new(&CharacterRamp::default());
        let a = conv.convert(&RasterFrame::new(40, 40), 20, 20, &diag).unwrap();
        let b = conv.convert(&RasterFrame::new(80, 20), 20, 20, &diag).unwrap();
        assert_eq!((a.width(), a.height()), (20, 10));
        assert_eq!((b.width(), b.height()), (20, 2));
    }
}
