//! Stroke styling: the pen color and width.

use std::fmt;

/// An 8-bit-per-channel, non-premultiplied RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// CSS hex notation; the alpha pair is omitted when opaque.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// How a segment is painted. Caps are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Line width in buffer pixels.
    pub width: f64,
    pub color: Rgba8,
}

impl StrokeStyle {
    /// The only pen the sketchpad draws with.
    pub const PEN: Self = Self {
        width: 10.0,
        color: Rgba8::opaque(0xf9, 0xf4, 0xda),
    };

    /// Canvas2D `lineCap` keyword matching the raster's capsule strokes.
    pub const LINE_CAP: &'static str = "round";

    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::PEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_hex_omits_opaque_alpha() {
        assert_eq!(StrokeStyle::PEN.color.to_css(), "#f9f4da");
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_css(), "#01020304");
        assert_eq!(Rgba8::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn pen_is_ten_pixels_round() {
        assert_eq!(StrokeStyle::PEN.width, 10.0);
        assert_eq!(StrokeStyle::LINE_CAP, "round");
        assert_eq!(StrokeStyle::PEN.radius(), 5.0);
    }
}
