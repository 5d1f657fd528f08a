use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::color::Color;
use crate::error::{Error, Result};

pub const DEFAULT_SWATCH_WIDTH: u32 = 200;
pub const DEFAULT_SWATCH_HEIGHT: u32 = 1000;

/// Paint one full-width horizontal band per color, top to bottom.
///
/// Every band is `height / colors.len()` rows tall; the last band also
/// takes the remaining `height % colors.len()` rows.
pub fn render_swatch(colors: &[Color], width: u32, height: u32) -> Result<RgbaImage> {
    let bands = colors.len();
    if bands == 0 || width == 0 || (height as usize) < bands {
        return Err(Error::InvalidSwatch {
            width,
            height,
            bands,
        });
    }
    info!("creating {width}x{height} palette swatch with {bands} bands");

    let band_height = height / bands as u32;
    let last = bands - 1;
    let fills: Vec<_> = colors.iter().map(|c| c.to_rgba8()).collect();

    Ok(RgbaImage::from_fn(width, height, |_, y| {
        let band = ((y / band_height) as usize).min(last);
        fills[band]
    }))
}

/// Encode the swatch as PNG, creating missing parent directories.
pub fn write_swatch(swatch: &RgbaImage, path: &Path) -> Result<()> {
    let to_err = |source| Error::SwatchWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| to_err(image::ImageError::IoError(e)))?;
    }
    swatch
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(to_err)?;
    info!("wrote palette swatch: {}", path.display());
    Ok(())
}
