use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use gs_core::error::CoreError;
use gs_core::frame::RasterFrame;

/// Resizer réutilisable wrappant fast_image_resize, filtre Lanczos3.
///
/// Les réductions d'un facteur 10 ou plus sont courantes : un filtre de
/// convolution évite l'aliasing qui rend l'art illisible.
///
/// # Example
/// ```
/// use gs_ascii::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (the fir API wants `&mut` on the source slice).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            src_buf: Vec::new(),
        }
    }

    /// Resample `src` to exactly `width × height` RGBA pixels.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for a zero target and
    /// [`CoreError::FrameConversion`] if the resampler fails.
    ///
    /// # Example
    /// ```
    /// use gs_ascii::resize::Resizer;
    /// use gs_core::frame::RasterFrame;
    /// let mut r = Resizer::new();
    /// let src = RasterFrame::new(100, 100);
    /// let dst = r.resize(&src, 50, 25).unwrap();
    /// assert_eq!((dst.width(), dst.height()), (50, 25));
    /// ```
    pub fn resize(
        &mut self,
        src: &RasterFrame,
        width: u32,
        height: u32,
    ) -> Result<RasterFrame, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        if src.width() == width && src.height() == height {
            return Ok(src.clone());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(src.data());

        let src_image =
            Image::from_slice_u8(src.width(), src.height(), &mut self.src_buf, PixelType::U8x4)
                .map_err(|e| resize_error(&e))?;
        let mut dst_image = Image::new(width, height, PixelType::U8x4);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|e| resize_error(&e))?;

        RasterFrame::from_rgba(width, height, dst_image.into_vec())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

fn resize_error(e: &dyn std::fmt::Display) -> CoreError {
    CoreError::FrameConversion {
        index: 0,
        reason: format!("resize: {e}"),
    }
}
