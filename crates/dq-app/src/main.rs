use anyhow::Result;
use clap::Parser;
use dq_core::config::{QuiltConfig, load_config};

pub mod cli;
pub mod tools;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    // 3. Charger la config
    let mut config = resolve_config(&cli)?;

    // 4. Dispatch
    match &cli.command {
        Command::Build(args) => {
            args.apply(&mut config);
            config.clamp_all();
            let request = args.request();
            log::info!(
                "Construction de la quilt : {} + {} → {}",
                request.colors.display(),
                request.images.display(),
                request.dst.display()
            );
            if let Err(e) = dq_quilt::run_build(&request, &config) {
                log::error!("Construction interrompue, manifeste non écrit : {e}");
                return Err(e.into());
            }
            Ok(())
        }
        Command::Blank(args) => tools::run_blank(args, &config),
        Command::Overlay(args) => tools::run_overlay(args, &config),
        Command::Resize(args) => tools::run_resize(args, &config),
    }
}

/// Config explicite (--config) ou valeurs par défaut.
fn resolve_config(cli: &Cli) -> Result<QuiltConfig> {
    match cli.config {
        Some(ref path) => load_config(path),
        None => Ok(QuiltConfig::default()),
    }
}
