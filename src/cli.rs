use std::path::PathBuf;

use clap::Parser;

use crate::config::{expand_home, Settings};
use crate::pipeline::rank::MAX_COLORS;

/// Generate Hyprland color settings from a random wallpaper.
#[derive(Parser, Debug, Default)]
#[command(name = "hyprhue", version, about)]
pub struct Args {
    /// Settings file (defaults to ~/.config/hyprhue/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to pick a random wallpaper from
    #[arg(long)]
    pub wallpaper_dir: Option<PathBuf>,

    /// Use this wallpaper instead of picking one at random
    #[arg(long)]
    pub wallpaper: Option<PathBuf>,

    /// Config template containing placeholder lines
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Where to write the generated config
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Live Hyprland config that receives the generated blocks
    #[arg(long)]
    pub user_config: Option<PathBuf>,

    /// Backup location for the original user config
    #[arg(long)]
    pub backup: Option<PathBuf>,

    /// Where to write the palette swatch PNG
    #[arg(long)]
    pub swatch: Option<PathBuf>,

    /// Number of colors to extract
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u8).range(1..=MAX_COLORS as i64))]
    pub colors: Option<u8>,

    /// Seed for the random wallpaper choice
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a colored terminal preview of the palette
    #[arg(long)]
    pub preview: bool,

    /// Print the generated config instead of writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Flags given on the command line win over every other source.
    pub fn apply_to(&self, settings: &mut Settings) {
        let overrides = [
            (&self.wallpaper_dir, &mut settings.wallpaper_dir),
            (&self.template, &mut settings.template),
            (&self.output, &mut settings.generated),
            (&self.user_config, &mut settings.user_config),
            (&self.backup, &mut settings.backup),
            (&self.swatch, &mut settings.swatch),
        ];
        for (flag, slot) in overrides {
            if let Some(path) = flag {
                *slot = expand_home(path);
            }
        }
        if let Some(n) = self.colors {
            settings.colors = n as usize;
        }
    }
}
