use crate::error::CoreError;

/// Frame raster décodée. Immuable une fois construite.
///
/// Stocke les pixels en RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use gs_core::frame::RasterFrame;
/// let fb = RasterFrame::new(10, 10);
/// assert_eq!(fb.data().len(), 400);
/// ```
#[derive(Clone, Debug)]
pub struct RasterFrame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterFrame {
    /// Crée une frame noire transparente aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use gs_core::frame::RasterFrame;
    /// let fb = RasterFrame::new(100, 50);
    /// assert_eq!(fb.width(), 100);
    /// assert_eq!(fb.height(), 50);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Wrap an RGBA buffer produced by a decoder.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or
    /// if `data` is not exactly `width * height * 4` bytes.
    ///
    /// # Example
    /// ```
    /// use gs_core::frame::RasterFrame;
    /// assert!(RasterFrame::from_rgba(2, 1, vec![0; 8]).is_ok());
    /// assert!(RasterFrame::from_rgba(0, 1, vec![]).is_err());
    /// ```
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || data.len() != width as usize * height as usize * 4 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Solid-color frame, mostly useful for tests and benches.
    ///
    /// # Example
    /// ```
    /// use gs_core::frame::RasterFrame;
    /// let white = RasterFrame::filled(4, 4, [255, 255, 255, 255]);
    /// assert_eq!(white.luminance(3, 3), 255);
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let data = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            data,
            width,
            height,
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Luminance ITU-R 601 (poids du mode `L` des bibliothèques d'imagerie courantes).
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let (r, g, b, _) = self.pixel(x, y);
        rgb_luminance(r, g, b)
    }
}

/// Luminance ITU-R 601 en arithmétique entière, arrondie au plus proche.
/// Noir → 0, blanc → 255.
///
/// # Example
/// ```
/// use gs_core::frame::rgb_luminance;
/// assert_eq!(rgb_luminance(0, 0, 0), 0);
/// assert_eq!(rgb_luminance(255, 255, 255), 255);
/// ```
#[inline(always)]
#[must_use]
pub fn rgb_luminance(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114 + 500) / 1000) as u8
}

/// Grille de caractères rectangulaire : une frame de l'animation.
///
/// Stockée à plat, row-major. Toutes les lignes ont la même longueur par
/// construction, et la grille fait au moins 1×1.
///
/// # Example
/// ```
/// use gs_core::frame::AsciiFrame;
/// let frame = AsciiFrame::from_cells(2, 2, vec!['@', ' ', ' ', '@']).unwrap();
/// assert_eq!(frame.lines(), vec!["@ ".to_string(), " @".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiFrame {
    cells: Vec<char>,
    width: u32,
    height: u32,
}

impl AsciiFrame {
    /// Build a frame from a flat row-major cell vector.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if a dimension is zero or
    /// if `cells.len() != width * height`.
    pub fn from_cells(width: u32, height: u32, cells: Vec<char>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || cells.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a frame from text rows.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if there are no rows, if a
    /// row is empty, or if the rows differ in length.
    ///
    /// # Example
    /// ```
    /// use gs_core::frame::AsciiFrame;
    /// assert!(AsciiFrame::from_rows(&["ab", "cd"]).is_ok());
    /// assert!(AsciiFrame::from_rows(&["ab", "c"]).is_err());
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, CoreError> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count()) as u32;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for row in rows {
            let before = cells.len();
            cells.extend(row.as_ref().chars());
            if cells.len() - before != width as usize {
                return Err(CoreError::InvalidDimensions { width, height });
            }
        }
        Self::from_cells(width, height, cells)
    }

    /// Width in characters.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in characters.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the character at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Row `y` as a slice of characters.
    #[inline]
    #[must_use]
    pub fn row(&self, y: u32) -> &[char] {
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks_exact(self.width as usize)
    }

    /// All cells, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Rows rendered as owned strings.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|r| r.iter().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raster_rejects_short_buffer() {
        assert!(matches!(
            RasterFrame::from_rgba(2, 2, vec![0; 15]),
            Err(CoreError::InvalidDimensions {
                width: 2,
                height: 2
            })
        ));
    }

    #[test]
    fn luminance_weights_sum_to_white() {
        assert_eq!(rgb_luminance(255, 0, 0), 76);
        assert_eq!(rgb_luminance(0, 255, 0), 150);
        assert_eq!(rgb_luminance(0, 0, 255), 29);
        assert_eq!(rgb_luminance(255, 255, 255), 255);
    }

    #[test]
    fn luminance_rounds_to_nearest() {
        // 587 / 1000 = 0.587 → 1
        assert_eq!(rgb_luminance(0, 1, 0), 1);
        // 114 / 1000 = 0.114 → 0
        assert_eq!(rgb_luminance(0, 0, 1), 0);
        // 128 * 0.587 = 75.136 ; 200 * 0.299 = 59.8 → 134.936 → 135
        assert_eq!(rgb_luminance(200, 128, 0), 135);
    }

    #[test]
    fn ascii_frame_rows_are_rectangular() {
        let frame = AsciiFrame::from_rows(&["abc", "def"]).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        assert!(frame.rows().all(|r| r.len() == 3));
        assert_eq!(frame.row(1), &['d', 'e', 'f']);
        assert_eq!(frame.get(2, 0), 'c');
    }

    #[test]
    fn ascii_frame_counts_chars_not_bytes() {
        let frame = AsciiFrame::from_rows(&["░▒", "▓█"]).unwrap();
        assert_eq!(frame.width(), 2);
    }

    #[test]
    fn ascii_frame_rejects_empty() {
        let rows: [&str; 0] = [];
        assert!(AsciiFrame::from_rows(&rows).is_err());
        assert!(AsciiFrame::from_rows(&[""]).is_err());
        assert!(AsciiFrame::from_cells(0, 0, vec![]).is_err());
    }
}
