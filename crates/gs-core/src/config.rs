use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{CharacterRamp, RAMP_DEFAULT};
use crate::error::CoreError;

/// Configuration complète du lecteur.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use gs_core::config::PlayerConfig;
/// let config = PlayerConfig::default();
/// assert_eq!(config.frame_interval_ms, 40);
/// assert_eq!(config.charset, "@%#*+=-:. ");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PlayerConfig {
    // === Conversion ===
    /// Rampe de caractères, du plus sombre au plus clair.
    pub charset: String,
    /// Convertir les frames en parallèle (rayon).
    pub parallel: bool,
    /// Décodeur de frames.
    pub decoder: DecoderKind,

    // === Lecture ===
    /// Délai entre deux frames en ms. 40 = 25 fps.
    pub frame_interval_ms: u64,
    /// Centrer chaque ligne dans le terminal.
    pub center: bool,

    // === Terminal ===
    /// Colonnes réservées (marge à droite).
    pub padding_cols: u16,
    /// Lignes réservées pour le prompt.
    pub padding_rows: u16,
    /// Taille de repli si le terminal ne répond pas (colonnes).
    pub fallback_cols: u16,
    /// Taille de repli si le terminal ne répond pas (lignes).
    pub fallback_rows: u16,
}

/// Which decoder extracts frames from the source.
///
/// # Example
/// ```
/// use gs_core::config::DecoderKind;
/// assert_eq!(DecoderKind::default(), DecoderKind::Native);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecoderKind {
    /// In-process decoding with the `image` crate.
    #[default]
    Native,
    /// `ffmpeg` subprocess writing PNG frames to a temporary directory.
    Ffmpeg,
}

impl std::str::FromStr for DecoderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "ffmpeg" => Ok(Self::Ffmpeg),
            other => Err(CoreError::Config(format!("décodeur inconnu '{other}'"))),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            charset: RAMP_DEFAULT.to_string(),
            parallel: false,
            decoder: DecoderKind::Native,
            frame_interval_ms: 40,
            center: false,
            padding_cols: 5,
            padding_rows: 5,
            fallback_cols: 80,
            fallback_rows: 20,
        }
    }
}

impl PlayerConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.frame_interval_ms = self.frame_interval_ms.min(10_000);
        self.fallback_cols = self.fallback_cols.max(1);
        self.fallback_rows = self.fallback_rows.max(1);
    }

    /// Inter-frame delay.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Parse `charset` into a ramp.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidRamp`] if the charset is empty.
    pub fn ramp(&self) -> Result<CharacterRamp, CoreError> {
        CharacterRamp::new(&self.charset)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    player: Option<PlayerSection>,
    terminal: Option<TerminalSection>,
}

/// Player section, all fields optional for partial override.
#[derive(Deserialize)]
struct PlayerSection {
    charset: Option<String>,
    parallel: Option<bool>,
    decoder: Option<DecoderKind>,
    frame_interval_ms: Option<u64>,
    center: Option<bool>,
}

#[derive(Deserialize)]
struct TerminalSection {
    padding_cols: Option<u16>,
    padding_rows: Option<u16>,
    fallback_cols: Option<u16>,
    fallback_rows: Option<u16>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed.
///
/// # Example
/// ```
/// use gs_core::config::parse_config;
/// let config = parse_config("[player]\nframe_interval_ms = 100\n").unwrap();
/// assert_eq!(config.frame_interval_ms, 100);
/// assert_eq!(config.padding_cols, 5);
/// ```
pub fn parse_config(content: &str) -> Result<PlayerConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = PlayerConfig::default();

    if let Some(p) = file.player {
        if let Some(v) = p.charset {
            config.charset = v;
        }
        if let Some(v) = p.parallel {
            config.parallel = v;
        }
        if let Some(v) = p.decoder {
            config.decoder = v;
        }
        if let Some(v) = p.frame_interval_ms {
            config.frame_interval_ms = v;
        }
        if let Some(v) = p.center {
            config.center = v;
        }
    }

    if let Some(t) = file.terminal {
        if let Some(v) = t.padding_cols {
            config.padding_cols = v;
        }
        if let Some(v) = t.padding_rows {
            config.padding_rows = v;
        }
        if let Some(v) = t.fallback_cols {
            config.fallback_cols = v;
        }
        if let Some(v) = t.fallback_rows {
            config.fallback_rows = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use gs_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PlayerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Config invalide : {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), PlayerConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = parse_config(
            r##"
            [player]
            charset = "#. "
            decoder = "ffmpeg"
            center = true

            [terminal]
            padding_rows = 2
            "##,
        )
        .unwrap();
        assert_eq!(config.charset, "#. ");
        assert_eq!(config.decoder, DecoderKind::Ffmpeg);
        assert!(config.center);
        assert_eq!(config.padding_rows, 2);
        assert_eq!(config.padding_cols, 5);
        assert_eq!(config.frame_interval_ms, 40);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config(
            "[player]\nframe_interval_ms = 999999\n[terminal]\nfallback_cols = 0\n",
        )
        .unwrap();
        assert_eq!(config.frame_interval_ms, 10_000);
        assert_eq!(config.fallback_cols, 1);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[player\ncharset = ").is_err());
        assert!(parse_config("[player]\ndecoder = \"gstreamer\"\n").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gifscii.toml");
        std::fs::write(&path, "[player]\nparallel = true\n").unwrap();
        assert!(load_config(&path).unwrap().parallel);
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn decoder_kind_from_str() {
        assert_eq!("FFmpeg".parse::<DecoderKind>().unwrap(), DecoderKind::Ffmpeg);
        assert!("vlc".parse::<DecoderKind>().is_err());
    }

    #[test]
    fn empty_charset_is_invalid_ramp() {
        let config = PlayerConfig {
            charset: String::new(),
            ..PlayerConfig::default()
        };
        assert!(matches!(config.ramp(), Err(CoreError::InvalidRamp)));
    }
}
