use crossterm::style::{Color as TermColor, Stylize};

use crate::color::Color;
use crate::pipeline::rank::RankedColor;

fn to_term(c: Color) -> TermColor {
    let rgb = c.to_srgb_u8();
    TermColor::Rgb {
        r: rgb.red,
        g: rgb.green,
        b: rgb.blue,
    }
}

/// Black or white, whichever reads better on `c`.
fn contrast_fg(c: Color) -> TermColor {
    if c.relative_luminance() > 0.4 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

/// One row per color: a swatch labelled with its rank, the hex and the share
/// of `total` pixels it covers.
pub fn render_preview(colors: &[RankedColor], total: u64) -> String {
    let mut out = String::new();
    for (i, ranked) in colors.iter().enumerate() {
        let label = format!("{:^8}", format!("$color{i}"));
        let swatch = label.with(contrast_fg(ranked.color)).on(to_term(ranked.color));
        let share = if total == 0 {
            0.0
        } else {
            ranked.count as f64 * 100.0 / total as f64
        };
        out.push_str(&format!(
            "  {swatch}  {}  {share:5.1}%\n",
            ranked.color.to_hex()
        ));
    }
    out
}
