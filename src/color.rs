//! Colors: RGB components plus opacity.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::validation::check_range;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    /// 0.0 is fully transparent, 1.0 fully opaque.
    #[serde(default = "default_opacity", alias = "alpha")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Color {
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            opacity: 1.0,
        }
    }

    /// Opacity quantized to the 8-bit alpha channel of the canvas.
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.red, self.green, self.blue, self.alpha())
    }

    /// Name of this color, when it is one of the named colors.
    pub fn name(&self) -> Option<&'static str> {
        NAMED_COLORS
            .iter()
            .find(|(_, color)| color == self)
            .map(|(name, _)| *name)
    }
}

pub const BLACK: Color = Color::opaque(0, 0, 0);
pub const RED: Color = Color::opaque(255, 0, 0);
pub const GREEN: Color = Color::opaque(0, 255, 0);
pub const BLUE: Color = Color::opaque(0, 0, 255);
pub const YELLOW: Color = Color::opaque(255, 255, 0);
pub const MAGENTA: Color = Color::opaque(255, 0, 255);
pub const CYAN: Color = Color::opaque(0, 255, 255);
pub const WHITE: Color = Color::opaque(255, 255, 255);
pub const TRANSPARENT: Color = Color {
    red: 0,
    green: 0,
    blue: 0,
    opacity: 0.0,
};

/// The vertices of the RGB cube, plus the fully-transparent color.
pub const NAMED_COLORS: [(&str, Color); 9] = [
    ("black", BLACK),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("magenta", MAGENTA),
    ("cyan", CYAN),
    ("white", WHITE),
    ("transparent", TRANSPARENT),
];

pub fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, color)| *color)
}

pub fn rgb_color(red: u8, green: u8, blue: u8) -> Color {
    Color::opaque(red, green, blue)
}

pub fn rgba_color(red: u8, green: u8, blue: u8, opacity: f64) -> Result<Color> {
    let opacity = check_range("opacity", opacity, 0.0, 1.0)?;
    Ok(Color {
        red,
        green,
        blue,
        opacity,
    })
}

/// Color from hue (0-360), saturation (0-1), value (0-1) and opacity.
pub fn hsv_color(hue: f64, saturation: f64, value: f64, opacity: f64) -> Result<Color> {
    check_range("hue", hue, 0.0, 360.0)?;
    check_range("saturation", saturation, 0.0, 1.0)?;
    check_range("value", value, 0.0, 1.0)?;
    let chroma = value * saturation;
    from_chroma(hue, chroma, value - chroma, opacity)
}

/// Color from hue (0-360), saturation (0-1), lightness (0-1) and opacity.
pub fn hsl_color(hue: f64, saturation: f64, lightness: f64, opacity: f64) -> Result<Color> {
    check_range("hue", hue, 0.0, 360.0)?;
    check_range("saturation", saturation, 0.0, 1.0)?;
    check_range("lightness", lightness, 0.0, 1.0)?;
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    from_chroma(hue, chroma, lightness - chroma / 2.0, opacity)
}

fn from_chroma(hue: f64, chroma: f64, offset: f64, opacity: f64) -> Result<Color> {
    let side = (hue / 60.0) % 6.0;
    let x = chroma * (1.0 - (side % 2.0 - 1.0).abs());
    let (r, g, b) = match side {
        s if s < 1.0 => (chroma, x, 0.0),
        s if s < 2.0 => (x, chroma, 0.0),
        s if s < 3.0 => (0.0, chroma, x),
        s if s < 4.0 => (0.0, x, chroma),
        s if s < 5.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let channel = |c: f64| ((c + offset) * 255.0) as u8;
    rgba_color(channel(r), channel(g), channel(b), opacity)
}
