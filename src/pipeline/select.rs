use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// File extensions accepted as wallpaper candidates.
pub const WALLPAPER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

fn is_wallpaper(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WALLPAPER_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// List wallpaper candidates in `dir`, sorted by path.
pub fn list_wallpapers(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_err = |source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if path.is_file() && is_wallpaper(&path) {
            found.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }
    found.sort();
    Ok(found)
}

/// Pick one wallpaper from `dir` at random.
///
/// With a seed the choice is reproducible for a given directory listing.
pub fn random_wallpaper(dir: &Path, seed: Option<u64>) -> Result<PathBuf> {
    info!("reading wallpaper directory: {}", dir.display());
    let candidates = list_wallpapers(dir)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let chosen = candidates
        .choose(&mut rng)
        .cloned()
        .ok_or_else(|| Error::NoWallpapers(dir.to_path_buf()))?;

    info!("selected random wallpaper: {}", chosen.display());
    Ok(chosen)
}
