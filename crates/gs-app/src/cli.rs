use std::path::PathBuf;

use clap::Parser;
use gs_core::config::{DecoderKind, PlayerConfig};

/// gifscii — lecteur de GIF animés en ASCII art dans le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à jouer (GIF animé, ou PNG/JPEG/BMP fixe).
    #[arg(default_value = "gifs/gif.gif")]
    pub path: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Rampe de caractères, du plus sombre au plus clair.
    #[arg(long)]
    pub charset: Option<String>,

    /// Décodeur de frames : native ou ffmpeg.
    #[arg(long)]
    pub decoder: Option<DecoderKind>,

    /// Délai entre deux frames, en millisecondes.
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Centrer l'animation dans le terminal.
    #[arg(long, default_value_t = false)]
    pub center: bool,

    /// Convertir les frames en parallèle.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les overrides CLI sur la config chargée.
    ///
    /// # Example
    /// ```
    /// use clap::Parser;
    /// use gs_app::cli::Cli;
    /// use gs_core::config::PlayerConfig;
    ///
    /// let cli = Cli::parse_from(["gifscii", "anim.gif", "--interval-ms", "100", "--center"]);
    /// let mut config = PlayerConfig::default();
    /// cli.apply_overrides(&mut config);
    /// assert_eq!(config.frame_interval_ms, 100);
    /// assert!(config.center);
    /// ```
    pub fn apply_overrides(&self, config: &mut PlayerConfig) {
        if let Some(ref charset) = self.charset {
            config.charset.clone_from(charset);
        }
        if let Some(decoder) = self.decoder {
            config.decoder = decoder;
        }
        if let Some(ms) = self.interval_ms {
            config.frame_interval_ms = ms;
        }
        if self.center {
            config.center = true;
        }
        if self.parallel {
            config.parallel = true;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_bundled_files() {
        let cli = Cli::parse_from(["gifscii"]);
        assert_eq!(cli.path, PathBuf::from("gifs/gif.gif"));
        assert_eq!(cli.log_level, "warn");
        assert!(cli.decoder.is_none());
    }

    #[test]
    fn decoder_flag_is_parsed() {
        let cli = Cli::parse_from(["gifscii", "x.gif", "--decoder", "ffmpeg"]);
        assert_eq!(cli.decoder, Some(DecoderKind::Ffmpeg));
        assert!(Cli::try_parse_from(["gifscii", "x.gif", "--decoder", "vlc"]).is_err());
    }

    #[test]
    fn absent_flags_keep_config_values() {
        let cli = Cli::parse_from(["gifscii", "x.gif"]);
        let mut config = PlayerConfig {
            center: true,
            charset: "#.".into(),
            ..PlayerConfig::default()
        };
        cli.apply_overrides(&mut config);
        assert!(config.center);
        assert_eq!(config.charset, "#.");
    }
}
