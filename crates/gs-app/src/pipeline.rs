use std::path::Path;

use gs_ascii::cache::{AnimationCache, build_cache, build_cache_parallel};
use gs_core::cancel::CancelToken;
use gs_core::charset::CharacterRamp;
use gs_core::config::PlayerConfig;
use gs_core::diagnostics::Diagnostics;
use gs_core::error::CoreError;
use gs_core::traits::{FrameDecoder, FrameResult};

/// Animation prête à jouer.
///
/// Le décodeur reste vivant aussi longtemps que l'animation : le décodeur
/// ffmpeg supprime son répertoire temporaire au drop.
pub struct LoadedAnimation {
    pub cache: AnimationCache,
    decoder: Box<dyn FrameDecoder>,
}

impl LoadedAnimation {
    /// Libère les ressources du décodeur (répertoire temporaire compris).
    pub fn release(self) -> AnimationCache {
        drop(self.decoder);
        self.cache
    }
}

/// Paramètres de conversion : rampe et boîte de caractères.
pub struct ConvertSettings<'a> {
    pub ramp: &'a CharacterRamp,
    pub target_width: u32,
    pub max_height: u32,
    pub parallel: bool,
}

impl<'a> ConvertSettings<'a> {
    #[must_use]
    pub fn new(ramp: &'a CharacterRamp, config: &PlayerConfig, bounds: (u32, u32)) -> Self {
        Self {
            ramp,
            target_width: bounds.0,
            max_height: bounds.1,
            parallel: config.parallel,
        }
    }
}

/// Frames décodées, pas encore converties.
pub struct DecodedSource {
    pub frames: Vec<FrameResult>,
    decoder: Box<dyn FrameDecoder>,
}

/// Décode `path` avec `decoder`.
///
/// # Errors
/// [`CoreError::SourceUnreadable`] / [`CoreError::FrameDecodeFailed`] si le
/// décodage échoue. Le décodeur est alors droppé (nettoyage compris).
pub fn decode_source(
    mut decoder: Box<dyn FrameDecoder>,
    path: &Path,
) -> Result<DecodedSource, CoreError> {
    let frames = decoder.decode(path)?;
    log::info!("{} frames décodées depuis {}", frames.len(), path.display());
    Ok(DecodedSource { frames, decoder })
}

impl DecodedSource {
    /// Convertit toutes les frames en cache ASCII.
    ///
    /// Les frames en échec sont ignorées (avec un avertissement) ; la lecture
    /// n'a lieu que si au moins une frame a été convertie.
    ///
    /// # Errors
    /// [`CoreError::EmptyCache`] si aucune frame n'a pu être convertie.
    pub fn convert(
        self,
        settings: &ConvertSettings<'_>,
        diagnostics: &dyn Diagnostics,
    ) -> Result<LoadedAnimation, CoreError> {
        let Self { frames, decoder } = self;
        let cache = if settings.parallel {
            build_cache_parallel(
                frames,
                settings.ramp,
                settings.target_width,
                settings.max_height,
                diagnostics,
            )
        } else {
            build_cache(
                frames,
                settings.ramp,
                settings.target_width,
                settings.max_height,
                diagnostics,
            )
        };

        Ok(LoadedAnimation {
            cache: cache.ensure_playable()?,
            decoder,
        })
    }
}

/// [`decode_source`], mais `Ok(None)` si `cancel` a été levé pendant le
/// décodage.
///
/// Ctrl-C atteint aussi le sous-processus ffmpeg, qui sort alors en erreur :
/// cet échec est une interruption, pas une erreur de décodage.
///
/// # Errors
/// See [`decode_source`]; only returned when `cancel` is not set.
pub fn decode_unless_cancelled(
    decoder: Box<dyn FrameDecoder>,
    path: &Path,
    cancel: &CancelToken,
) -> Result<Option<DecodedSource>, CoreError> {
    match decode_source(decoder, path) {
        _ if cancel.is_cancelled() => Ok(None),
        Ok(decoded) => Ok(Some(decoded)),
        Err(e) => Err(e),
    }
}
