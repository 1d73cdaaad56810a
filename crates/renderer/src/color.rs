//! Resolving CSS color strings for the presentation layer.

use csscolorparser::Color;
use log::warn;

/// 8-bit channels, alpha last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const BLACK: Self = Self {
        red: 0,
        green: 0,
        blue: 0,
        alpha: 255,
    };
}

/// Parse named, hex and functional colors. `None` for anything unrecognised.
pub fn to_rgba(input: &str) -> Option<Rgba> {
    let parsed: Color = input.parse().ok()?;
    let [red, green, blue, alpha] = parsed.to_rgba8();
    Some(Rgba {
        red,
        green,
        blue,
        alpha,
    })
}

/// Like [`to_rgba`], falling back to black so painting can go on.
pub fn to_rgba_or_black(input: &str) -> Rgba {
    to_rgba(input).unwrap_or_else(|| {
        warn!("unknown color `{input}`, painting black");
        Rgba::BLACK
    })
}
