use std::collections::HashMap;
use std::path::Path;

use image::{GenericImageView, Rgba};
use tracing::info;

use crate::color::Color;
use crate::error::{Error, Result};

/// A decoded wallpaper with 16 bits per channel.
pub type Wallpaper = image::ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Decode the wallpaper at `path` into 16-bit RGBA.
pub fn load_wallpaper(path: &Path) -> Result<Wallpaper> {
    info!("decoding wallpaper for color analysis: {}", path.display());
    let img = image::open(path).map_err(|source| Error::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba16())
}

/// Occurrence count of every distinct color in an image.
///
/// Built once by [`ColorHistogram::from_image`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ColorHistogram {
    counts: HashMap<Color, u64>,
}

impl ColorHistogram {
    /// Count every pixel of `img` exactly once.
    pub fn from_image<I>(img: &I) -> Self
    where
        I: GenericImageView<Pixel = Rgba<u16>>,
    {
        info!("preparing color histogram");
        img.pixels()
            .map(|(_, _, pixel)| Color::from_pixel(pixel))
            .collect()
    }

    pub fn count(&self, color: &Color) -> u64 {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, equal to the image area.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Color, u64)> + '_ {
        self.counts.iter().map(|(color, count)| (*color, *count))
    }
}

impl FromIterator<Color> for ColorHistogram {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        let mut counts = HashMap::new();
        for color in iter {
            *counts.entry(color).or_insert(0) += 1;
        }
        Self { counts }
    }
}
