// Décodage via ffmpeg en sous-processus (std::process::Command).
// Prérequis : `ffmpeg` accessible dans PATH.
//
// Architecture :
//   - `extract_frames` : lance ffmpeg → une PNG par frame dans un TempDir
//   - `list_frames`    : liste les PNG extraites, triées par numéro
//   - `FfmpegDecoder`  : charge chaque PNG ; le TempDir vit aussi longtemps
//                        que le décodeur et est supprimé au drop

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use gs_core::error::CoreError;
use gs_core::traits::{FrameDecoder, FrameResult};
use tempfile::TempDir;

use crate::image::load_image;

/// Préfixe des fichiers extraits (`frame_0001.png`, ...).
const FRAME_PREFIX: &str = "frame";

/// Décodeur ffmpeg. Les frames extraites vivent dans un répertoire
/// temporaire détenu par le décodeur.
///
/// # Example
/// ```no_run
/// use gs_core::traits::FrameDecoder;
/// use gs_source::ffmpeg::FfmpegDecoder;
/// use std::path::Path;
/// // Nécessite ffmpeg en PATH
/// let mut decoder = FfmpegDecoder::new();
/// let frames = decoder.decode(Path::new("gifs/gif.gif")).unwrap();
/// drop(decoder); // supprime le répertoire temporaire
/// ```
#[derive(Debug)]
pub struct FfmpegDecoder {
    program: PathBuf,
    workdir: Option<TempDir>,
}

impl FfmpegDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Use a specific ffmpeg executable.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: None,
        }
    }

    /// Temporary directory holding the extracted frames, if any.
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.workdir.as_ref().map(TempDir::path)
    }
}

impl Default for FfmpegDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FfmpegDecoder {
    fn drop(&mut self) {
        if let Some(dir) = self.workdir.take() {
            log::info!("Nettoyage du répertoire temporaire : {}", dir.path().display());
            if let Err(e) = dir.close() {
                log::warn!("Nettoyage incomplet : {e}");
            }
        }
    }
}

impl FrameDecoder for FfmpegDecoder {
    fn decode(&mut self, path: &Path) -> Result<Vec<FrameResult>, CoreError> {
        if !path.is_file() {
            return Err(CoreError::unreadable(path, "fichier introuvable"));
        }

        let workdir = tempfile::Builder::new()
            .prefix("gifscii-frames-")
            .tempdir()
            .map_err(|e| CoreError::FrameDecodeFailed(format!("répertoire temporaire : {e}")))?;

        extract_frames(&self.program, path, workdir.path())?;
        let files = list_frames(workdir.path())
            .map_err(|e| CoreError::FrameDecodeFailed(format!("lecture des frames : {e}")))?;

        let frames = files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                load_image(file).map_err(|e| CoreError::FrameConversion {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect();

        self.workdir = Some(workdir);
        Ok(frames)
    }
}

/// Lance `ffmpeg -i <gif> <out>/frame_%04d.png` et attend sa fin.
///
/// # Errors
/// [`CoreError::FrameDecodeFailed`] si ffmpeg est introuvable ou retourne
/// un code non nul.
pub fn extract_frames(program: &Path, gif: &Path, out_dir: &Path) -> Result<(), CoreError> {
    let pattern = out_dir.join(format!("{FRAME_PREFIX}_%04d.png"));

    log::debug!(
        "extract_frames: {} -i {} {}",
        program.display(),
        gif.display(),
        pattern.display()
    );

    let status = Command::new(program)
        .arg("-hide_banner")
        .args(["-loglevel", "error"])
        .arg("-i")
        .arg(gif)
        .arg(&pattern)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| {
            CoreError::FrameDecodeFailed(format!(
                "impossible de lancer {} ({e}). Vérifiez que ffmpeg est installé et dans le PATH.",
                program.display()
            ))
        })?;

    if !status.success() {
        return Err(CoreError::FrameDecodeFailed(format!(
            "ffmpeg a échoué sur {} (code {})",
            gif.display(),
            status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string())
        )));
    }
    Ok(())
}

/// Numéro de frame : première suite de chiffres du nom de fichier.
///
/// # Example
/// ```
/// use gs_source::ffmpeg::frame_number;
/// assert_eq!(frame_number("frame_0012.png"), Some(12));
/// assert_eq!(frame_number("frame.png"), None);
/// ```
#[must_use]
pub fn frame_number(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &name[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

/// Liste les frames extraites dans `dir`, triées par numéro.
///
/// # Errors
/// Returns an I/O error if the directory cannot be read.
pub fn list_frames(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut numbered = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.starts_with(FRAME_PREFIX) {
            continue;
        }
        if let Some(n) = frame_number(name) {
            numbered.push((n, entry.path()));
        }
    }
    numbered.sort_by_key(|(n, _)| *n);
    Ok(numbered.into_iter().map(|(_, p)| p).collect())
}
