use anyhow::{Context, Result};
use clap::Parser;
use gs_app::cli::Cli;
use gs_app::input::StdinCommands;
use gs_app::pipeline::{self, ConvertSettings};
use gs_app::player::{Player, StopReason};
use gs_core::cancel::CancelToken;
use gs_core::config::{PlayerConfig, load_config};
use gs_core::diagnostics::LogDiagnostics;
use gs_render::canvas::{TerminalRenderer, terminal_bounds};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    let ramp = config.ramp().context("Rampe de caractères invalide")?;

    // 4. Boîte de caractères disponible
    let bounds = terminal_bounds(
        config.padding_cols,
        config.padding_rows,
        (config.fallback_cols, config.fallback_rows),
    );
    log::debug!("boîte disponible : {}×{}", bounds.0, bounds.1);

    // 5. Ctrl-C → annulation coopérative (installé avant le décodage)
    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("Installation du gestionnaire Ctrl-C impossible")?;

    // 6. Décoder + convertir (le décodeur vit jusqu'à la fin de main)
    let diagnostics = LogDiagnostics;
    println!("Extraction des frames de '{}'...", cli.path.display());
    let decoder = gs_source::decoder_for(config.decoder);
    let Some(decoded) = pipeline::decode_unless_cancelled(decoder, &cli.path, &cancel)
        .with_context(|| format!("Impossible de décoder '{}'", cli.path.display()))?
    else {
        println!("\nAnimation interrompue.");
        return Ok(());
    };
    println!("Conversion de {} frames en ASCII...", decoded.frames.len());
    let settings = ConvertSettings::new(&ramp, &config, bounds);
    let animation = decoded
        .convert(&settings, &diagnostics)
        .context("Aucune frame à jouer")?;

    if cancel.is_cancelled() {
        println!("\nAnimation interrompue.");
        drop(animation.release());
        return Ok(());
    }

    println!(
        "{} frames prêtes. Entrée : jouer une fois, un nombre : répéter, 'q' : quitter.",
        animation.cache.len()
    );

    // 7. Boucle interactive
    let mut commands = StdinCommands::spawn("> ").context("Lecture de stdin impossible")?;
    let reason = {
        let mut player = Player::new(
            &animation.cache,
            TerminalRenderer::stdout(),
            &diagnostics,
            cancel,
        )
        .with_interval(config.frame_interval())
        .with_center(config.center);
        player.run(&mut commands)
    };

    if reason == StopReason::Interrupted {
        println!("\nAnimation interrompue.");
    }
    log::info!("arrêt : {reason:?}");

    // 8. Nettoyage (répertoire temporaire du décodeur)
    drop(animation.release());
    Ok(())
}

/// Fichier de config s'il existe, sinon valeurs par défaut.
fn resolve_config(cli: &Cli) -> Result<PlayerConfig> {
    if cli.config.exists() {
        load_config(&cli.config)
    } else {
        log::info!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(PlayerConfig::default())
    }
}
