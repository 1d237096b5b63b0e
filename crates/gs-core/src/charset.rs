use crate::error::CoreError;

/// 10 caractères, du plus sombre au plus clair. Rampe par défaut.
pub const RAMP_DEFAULT: &str = "@%#*+=-:. ";

/// Rampe de caractères ordonnée du plus sombre (index 0) au plus clair.
///
/// Invariant : au moins un caractère.
///
/// # Example
/// ```
/// use gs_core::charset::CharacterRamp;
/// let ramp = CharacterRamp::new("@. ").unwrap();
/// assert_eq!(ramp.len(), 3);
/// assert_eq!(ramp.darkest(), '@');
/// assert_eq!(ramp.lightest(), ' ');
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterRamp {
    chars: Vec<char>,
}

impl CharacterRamp {
    /// Build a ramp from a string ordered darkest→lightest.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRamp`] if `ramp` is empty.
    pub fn new(ramp: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = ramp.chars().collect();
        if chars.is_empty() {
            return Err(CoreError::InvalidRamp);
        }
        Ok(Self { chars })
    }

    /// Number of characters, always ≥ 1.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters darkest→lightest.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// `ramp[0]`.
    #[must_use]
    pub fn darkest(&self) -> char {
        self.chars[0]
    }

    /// `ramp[N-1]`.
    #[must_use]
    pub fn lightest(&self) -> char {
        self.chars[self.chars.len() - 1]
    }
}

impl Default for CharacterRamp {
    fn default() -> Self {
        Self {
            chars: RAMP_DEFAULT.chars().collect(),
        }
    }
}

/// Lookup table mapping luminance [0..255] → character.
///
/// Pre-computed once per ramp for O(1) per-pixel cost.
/// `lut[p] = ramp[floor(p * (N-1) / 255)]`.
///
/// # Example
/// ```
/// use gs_core::charset::{CharacterRamp, LuminanceLut};
/// let ramp = CharacterRamp::new("@%#*+=-:. ").unwrap();
/// let lut = LuminanceLut::new(&ramp);
/// assert_eq!(lut.map(0), '@');
/// assert_eq!(lut.map(255), ' ');
/// ```
#[derive(Clone)]
pub struct LuminanceLut {
    lut: [char; 256],
}

impl LuminanceLut {
    /// Build a LUT from a ramp ordered darkest→lightest.
    #[must_use]
    pub fn new(ramp: &CharacterRamp) -> Self {
        let chars = ramp.chars();
        let last = chars.len() - 1;
        let mut lut = [' '; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = chars[(i * last / 255).min(last)];
        }
        Self { lut }
    }

    /// Map a luminance value [0..255] to a character.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ramp_is_rejected() {
        assert!(matches!(CharacterRamp::new(""), Err(CoreError::InvalidRamp)));
    }

    #[test]
    fn lut_maps_extremes() {
        let ramp = CharacterRamp::default();
        let lut = LuminanceLut::new(&ramp);
        assert_eq!(lut.map(0), '@');
        assert_eq!(lut.map(255), ' ');
    }

    #[test]
    fn lut_matches_float_quantization() {
        let ramp = CharacterRamp::default();
        let lut = LuminanceLut::new(&ramp);
        let n = ramp.len();
        for p in 0..=255u8 {
            let idx = ((f64::from(p) / 255.0) * (n - 1) as f64) as usize;
            assert_eq!(lut.map(p), ramp.chars()[idx.min(n - 1)], "luminance {p}");
        }
    }

    #[test]
    fn lut_monotonic() {
        let ramp = CharacterRamp::new("$@B%8&WM#*oahkbdpqwm:. ").unwrap();
        let lut = LuminanceLut::new(&ramp);
        let mut prev_idx = 0usize;
        for i in 0..=255u8 {
            let ch = lut.map(i);
            let idx = ramp.chars().iter().position(|&c| c == ch).unwrap();
            assert!(idx >= prev_idx, "LUT non monotone à luminance {i}");
            prev_idx = idx;
        }
    }

    #[test]
    fn single_char_ramp_maps_everything() {
        let ramp = CharacterRamp::new("#").unwrap();
        let lut = LuminanceLut::new(&ramp);
        assert!((0..=255u8).all(|p| lut.map(p) == '#'));
    }
}
