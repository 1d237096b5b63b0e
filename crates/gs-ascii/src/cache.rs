use gs_core::charset::CharacterRamp;
use gs_core::diagnostics::Diagnostics;
use gs_core::error::CoreError;
use gs_core::frame::AsciiFrame;
use gs_core::traits::FrameResult;
use rayon::prelude::*;

use crate::luminance::AsciiConverter;

/// Séquence ordonnée des frames converties, construite une seule fois.
///
/// Index = ordre temporel. Lecture seule pendant la lecture.
///
/// # Example
/// ```
/// use gs_ascii::cache::AnimationCache;
/// use gs_core::frame::AsciiFrame;
/// let cache = AnimationCache::from_frames(vec![AsciiFrame::from_rows(&["@"]).unwrap()]);
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnimationCache {
    frames: Vec<AsciiFrame>,
}

impl AnimationCache {
    #[must_use]
    pub fn from_frames(frames: Vec<AsciiFrame>) -> Self {
        Self { frames }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AsciiFrame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AsciiFrame> {
        self.frames.iter()
    }

    /// Fails with [`CoreError::EmptyCache`] when nothing can be played.
    ///
    /// # Errors
    /// [`CoreError::EmptyCache`] if the cache holds no frame.
    pub fn ensure_playable(self) -> Result<Self, CoreError> {
        if self.frames.is_empty() {
            return Err(CoreError::EmptyCache);
        }
        Ok(self)
    }
}

impl<'a> IntoIterator for &'a AnimationCache {
    type Item = &'a AsciiFrame;
    type IntoIter = std::slice::Iter<'a, AsciiFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

fn skip_warning(index: usize, err: &CoreError, diagnostics: &dyn Diagnostics) {
    diagnostics.warn(&format!(
        "Frame {} ignorée suite à un échec de conversion : {err}",
        index + 1
    ));
}

/// Convertit toutes les frames, dans l'ordre.
///
/// Une frame en échec (décodage ou conversion) est ignorée avec un
/// avertissement : une frame corrompue n'empêche pas de jouer les autres.
/// Ne retourne jamais d'erreur ; un cache vide est à traiter par l'appelant
/// (voir [`AnimationCache::ensure_playable`]).
///
/// # Example
/// ```
/// use gs_ascii::cache::build_cache;
/// use gs_core::charset::CharacterRamp;
/// use gs_core::diagnostics::MemoryDiagnostics;
/// use gs_core::error::CoreError;
/// use gs_core::frame::RasterFrame;
///
/// let frames = vec![
///     Ok(RasterFrame::filled(8, 8, [0, 0, 0, 255])),
///     Err(CoreError::FrameDecodeFailed("corrupt".into())),
///     Ok(RasterFrame::filled(8, 8, [255, 255, 255, 255])),
/// ];
/// let diag = MemoryDiagnostics::default();
/// let cache = build_cache(frames, &CharacterRamp::default(), 8, 8, &diag);
/// assert_eq!(cache.len(), 2);
/// assert_eq!(diag.warnings().len(), 1);
/// ```
pub fn build_cache<I>(
    frames: I,
    ramp: &CharacterRamp,
    target_width: u32,
    max_height: u32,
    diagnostics: &dyn Diagnostics,
) -> AnimationCache
where
    I: IntoIterator<Item = FrameResult>,
{
    let mut converter = AsciiConverter::new(ramp);
    let mut out = Vec::new();
    for (index, frame) in frames.into_iter().enumerate() {
        let converted = frame
            .and_then(|f| converter.convert(&f, target_width, max_height, diagnostics));
        match converted {
            Ok(ascii) => out.push(ascii),
            Err(e) => skip_warning(index, &e, diagnostics),
        }
    }
    log::debug!("build_cache: {} frames converties", out.len());
    AnimationCache::from_frames(out)
}

/// Variante parallèle de [`build_cache`] (rayon, un convertisseur par worker).
///
/// Chaque frame lit sa propre `RasterFrame` et produit son propre slot :
/// aucune donnée partagée mutable. L'ordre temporel est conservé.
///
/// # Example
/// ```
/// use gs_ascii::cache::build_cache_parallel;
/// use gs_core::charset::CharacterRamp;
/// use gs_core::diagnostics::MemoryDiagnostics;
/// use gs_core::frame::RasterFrame;
///
/// let frames = (0..4).map(|_| Ok(RasterFrame::new(8, 8))).collect();
/// let diag = MemoryDiagnostics::default();
/// let cache = build_cache_parallel(frames, &CharacterRamp::default(), 8, 8, &diag);
/// assert_eq!(cache.len(), 4);
/// ```
pub fn build_cache_parallel(
    frames: Vec<FrameResult>,
    ramp: &CharacterRamp,
    target_width: u32,
    max_height: u32,
    diagnostics: &dyn Diagnostics,
) -> AnimationCache {
    let converted: Vec<Result<AsciiFrame, CoreError>> = frames
        .into_par_iter()
        .map_init(
            || AsciiConverter::new(ramp),
            |converter, frame| {
                frame.and_then(|f| converter.convert(&f, target_width, max_height, diagnostics))
            },
        )
        .collect();

    let mut out = Vec::with_capacity(converted.len());
    for (index, result) in converted.into_iter().enumerate() {
        match result {
            Ok(ascii) => out.push(ascii),
            Err(e) => skip_warning(index, &e, diagnostics),
        }
    }
    log::debug!("build_cache_parallel: {} frames converties", out.len());
    AnimationCache::from_frames(out)
}
