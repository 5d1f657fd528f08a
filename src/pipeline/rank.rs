use tracing::info;

use crate::color::Color;
use crate::error::{Error, Result};
use crate::pipeline::extract::ColorHistogram;

/// Largest selection the generated config has slots for.
pub const MAX_COLORS: usize = 5;

/// A distinct color together with how many pixels carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedColor {
    pub color: Color,
    pub count: u64,
}

/// All distinct colors, most frequent first.
///
/// Equal counts keep whatever order the histogram iterates them in; that
/// order is stable for one call but not across runs.
pub fn rank_colors(histogram: &ColorHistogram) -> Vec<RankedColor> {
    let mut ranked: Vec<RankedColor> = histogram
        .iter()
        .map(|(color, count)| RankedColor { color, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// The first `n` entries of a ranked list.
pub fn top_n(ranked: &[RankedColor], n: usize) -> Result<Vec<RankedColor>> {
    if ranked.len() < n {
        return Err(Error::InsufficientColors {
            required: n,
            found: ranked.len(),
        });
    }
    info!("selected top {n} of {} distinct colors", ranked.len());
    Ok(ranked[..n].to_vec())
}
