use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hyprhue::app::{self, RunOptions};
use hyprhue::cli::Args;
use hyprhue::config::{expand_home, Settings};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = Settings::load(args.config.as_deref()).context("failed to load settings")?;
    settings.apply_env(|key| std::env::var(key).ok())?;
    args.apply_to(&mut settings);

    let options = RunOptions {
        wallpaper: args.wallpaper.as_deref().map(expand_home),
        seed: args.seed,
        preview: args.preview,
        dry_run: args.dry_run,
    };
    let report = app::run(&settings, &options)?;

    info!(
        "applied {} colors from {}",
        report.colors.len(),
        report.wallpaper.display()
    );
    Ok(())
}
