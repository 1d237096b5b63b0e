use std::path::Path;

use crate::error::CoreError;
use crate::frame::{AsciiFrame, RasterFrame};

/// Résultat du décodage d'une frame individuelle.
///
/// Un décodeur peut échouer sur une seule frame sans invalider les autres.
pub type FrameResult = Result<RasterFrame, CoreError>;

/// Extrait la séquence ordonnée de frames d'un fichier image animé.
///
/// Implémenté par : `NativeDecoder`, `FfmpegDecoder`.
///
/// # Example
/// ```
/// use gs_core::traits::{FrameDecoder, FrameResult};
/// use gs_core::error::CoreError;
/// use gs_core::frame::RasterFrame;
/// use std::path::Path;
///
/// struct SolidDecoder;
/// impl FrameDecoder for SolidDecoder {
///     fn decode(&mut self, _path: &Path) -> Result<Vec<FrameResult>, CoreError> {
///         Ok(vec![Ok(RasterFrame::new(4, 4))])
///     }
/// }
/// ```
pub trait FrameDecoder {
    /// Décode `path` en frames, dans l'ordre temporel.
    ///
    /// `Err` signale un échec global (source illisible, décodeur en erreur).
    /// `Ok(vec![])` signifie « zéro frame produite », ce qui n'est pas un échec
    /// du décodeur.
    ///
    /// # Errors
    /// [`CoreError::SourceUnreadable`] or [`CoreError::FrameDecodeFailed`].
    fn decode(&mut self, path: &Path) -> Result<Vec<FrameResult>, CoreError>;
}

/// Affiche une frame ASCII en remplaçant la précédente.
///
/// # Example
/// ```
/// use gs_core::traits::Renderer;
/// use gs_core::error::CoreError;
/// use gs_core::frame::AsciiFrame;
///
/// struct Counting(usize);
/// impl Renderer for Counting {
///     fn render(&mut self, _frame: &AsciiFrame, _center: bool) -> Result<(), CoreError> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Renderer {
    /// Efface l'affichage précédent et écrit `frame`, centrée si demandé.
    ///
    /// # Errors
    /// [`CoreError::RenderFailure`] on output failure.
    fn render(&mut self, frame: &AsciiFrame, center: bool) -> Result<(), CoreError>;

    /// Called once before a playback run. Default: no-op.
    ///
    /// # Errors
    /// [`CoreError::RenderFailure`] on output failure.
    fn begin(&mut self) -> Result<(), CoreError> {
        Ok(())
    }

    /// Called once after a playback run, whatever its outcome. Default: no-op.
    fn finish(&mut self) {}
}
