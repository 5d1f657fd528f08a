use std::path::PathBuf;

use tracing::{debug, error, info, warn};

use crate::color::{config_lines, Color};
use crate::config::Settings;
use crate::error::Result;
use crate::merge::{self, BORDER_SETTINGS};
use crate::pipeline::extract::{load_wallpaper, ColorHistogram};
use crate::pipeline::rank::{rank_colors, top_n, RankedColor};
use crate::pipeline::select::random_wallpaper;
use crate::pipeline::swatch::{render_swatch, write_swatch};
use crate::preview::render_preview;
use crate::template::{write_generated, Template};

/// Per-invocation switches that are not part of the persistent settings.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip the random pick and use this file.
    pub wallpaper: Option<PathBuf>,
    pub seed: Option<u64>,
    pub preview: bool,
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub wallpaper: PathBuf,
    pub colors: Vec<RankedColor>,
    pub generated: String,
    /// The merged user config; raw bytes because the user's part is kept verbatim.
    pub merged: Vec<u8>,
    /// Files written, in the order they were written.
    pub written: Vec<PathBuf>,
}

/// Pick a wallpaper, extract its colors and produce every output.
///
/// Everything is computed in memory before the first write, so a bad
/// template or a too-plain image leaves all outputs untouched. Files are
/// written as backup, generated config, swatch, then the merged user config.
pub fn run(settings: &Settings, options: &RunOptions) -> Result<RunReport> {
    settings.validate()?;

    let original = merge::read_user_config(&settings.user_config);
    if let Err(err) = &original {
        error!("{err}");
    }
    debug!("bundled border settings:\n{BORDER_SETTINGS}");

    let wallpaper = match &options.wallpaper {
        Some(path) => {
            info!("using wallpaper: {}", path.display());
            path.clone()
        }
        None => random_wallpaper(&settings.wallpaper_dir, options.seed)?,
    };

    let image = load_wallpaper(&wallpaper)?;
    let histogram = ColorHistogram::from_image(&image);
    let ranked = rank_colors(&histogram);
    let top = top_n(&ranked, settings.colors)?;
    let colors: Vec<Color> = top.iter().map(|r| r.color).collect();

    if options.preview {
        print!("{}", render_preview(&top, histogram.total()));
    }

    let swatch = render_swatch(&colors, settings.swatch_width, settings.swatch_height)?;
    info!("formatting hex colors for config generator");
    let lines = config_lines(&colors);

    let template = Template::load(&settings.template, &settings.placeholders)?;
    let generated = template.render(&lines, &wallpaper)?;
    let user_config = match &original {
        Ok(Some(bytes)) => bytes.as_slice(),
        _ => &[],
    };
    let merged = merge::merge_config(user_config, &lines, BORDER_SETTINGS);

    let mut report = RunReport {
        wallpaper,
        colors: top,
        generated,
        merged,
        written: Vec::new(),
    };

    if options.dry_run {
        info!("dry run, nothing written");
        print!("{}", report.generated);
        return Ok(report);
    }

    // The live config is only replaced once its previous content is safe.
    let backed_up = match &original {
        Ok(Some(bytes)) => match merge::write_backup(bytes, &settings.backup) {
            Ok(()) => {
                report.written.push(settings.backup.clone());
                true
            }
            Err(err) => {
                error!("{err}");
                false
            }
        },
        Ok(None) => true,
        Err(_) => false,
    };

    write_generated(&report.generated, &settings.generated)?;
    report.written.push(settings.generated.clone());

    write_swatch(&swatch, &settings.swatch)?;
    report.written.push(settings.swatch.clone());

    if backed_up {
        merge::write_merged(&report.merged, &settings.user_config)?;
        report.written.push(settings.user_config.clone());
    } else {
        warn!(
            "leaving {} untouched because it could not be backed up",
            settings.user_config.display()
        );
    }

    Ok(report)
}
