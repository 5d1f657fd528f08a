use std::fmt;

use image::Rgba;
use palette::{LinSrgb, Srgb};

/// One pixel color as reported by the decoder: four 16-bit channels.
///
/// Two pixels are the same color iff all four channels match exactly.
/// 8-bit sources are widened by the decoder (`v * 257`), so their low and
/// high bytes both equal the original value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl Color {
    pub fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Widen 8-bit channels the same way the decoder does.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        let widen = |v: u8| u16::from(v) * 257;
        Self::new(widen(r), widen(g), widen(b), widen(a))
    }

    pub fn from_pixel(pixel: Rgba<u16>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }

    /// Color channels scaled by alpha, the form the hex strings are built
    /// from. Opaque colors are unchanged.
    pub fn premultiplied(self) -> Self {
        let scale = |c: u16| (u32::from(c) * u32::from(self.a) / 0xffff) as u16;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// The low byte of every premultiplied channel, in RGBA order.
    ///
    /// This is what the config strings are built from. It drops the high
    /// byte of true 16-bit sources; kept for output compatibility.
    pub fn low_bytes(self) -> [u8; 4] {
        let c = self.premultiplied();
        [
            (c.r & 0xff) as u8,
            (c.g & 0xff) as u8,
            (c.b & 0xff) as u8,
            (c.a & 0xff) as u8,
        ]
    }

    /// 8-bit RGBA as an 8-bit encoder would store it (high byte).
    pub fn to_rgba8(self) -> Rgba<u8> {
        Rgba([
            (self.r >> 8) as u8,
            (self.g >> 8) as u8,
            (self.b >> 8) as u8,
            (self.a >> 8) as u8,
        ])
    }

    /// Lowercase `rrggbbaa` built from [`Color::low_bytes`].
    ///
    /// Translucent pixels come out alpha-premultiplied; the histogram itself
    /// still keys on the straight channels.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.low_bytes();
        format!("{r:02x}{g:02x}{b:02x}{a:02x}")
    }

    /// The config line for this color at rank `index`.
    pub fn config_line(self, index: usize) -> String {
        format!("$color{index} = rgba({})", self.to_hex())
    }

    /// Convert to `palette::Srgb<u8>` (high byte, alpha dropped).
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        let Rgba([r, g, b, _]) = self.to_rgba8();
        Srgb::new(r, g, b)
    }

    /// WCAG 2.0 relative luminance of the opaque color.
    pub fn relative_luminance(self) -> f32 {
        let linear: LinSrgb<f32> = self.to_srgb_u8().into_format::<f32>().into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// One config line per color, numbered by rank.
pub fn config_lines(colors: &[Color]) -> Vec<String> {
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| c.config_line(i))
        .collect()
}
