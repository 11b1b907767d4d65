//! Coordinate spaces.
//!
//! Input arrives in *display* space (CSS pixels relative to the surface's
//! on-screen box). Drawing happens in *buffer* space (the surface's internal
//! pixel grid). The two differ whenever the canvas is scaled by layout or by
//! a high-density display.

use kurbo::{Point, Rect};
use std::fmt;

/// A position on the surface's pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelPos {
    pub x: i32,
    pub y: i32,
}

impl PixelPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Pixel center in buffer space.
    pub fn center(self) -> Point {
        Point::new(self.x as f64 + 0.5, self.y as f64 + 0.5)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for PixelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One straight stroke between two consecutive pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: PixelPos,
    pub to: PixelPos,
}

impl Segment {
    pub const fn new(from: PixelPos, to: PixelPos) -> Self {
        Self { from, to }
    }

    pub fn to_line(self) -> kurbo::Line {
        kurbo::Line::new(self.from.to_point(), self.to.to_point())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Dimensions of a surface's internal pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
}

impl BufferSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The surface's on-screen box, as reported by a bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayBox(Rect);

impl DisplayBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self(Rect::new(left, top, left + width, top + height))
    }

    /// A box at the origin that displays the buffer 1:1.
    pub fn unscaled(size: BufferSize) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    pub fn origin(&self) -> Point {
        self.0.origin()
    }

    /// The same extent moved to `origin`. Scrolling moves a box this way.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self(self.0.with_origin(origin))
    }

    pub fn width(&self) -> f64 {
        self.0.width()
    }

    pub fn height(&self) -> f64 {
        self.0.height()
    }

    /// Make a viewport-relative (client) point relative to this box.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.0.x0, client.y - self.0.y0)
    }

    /// Map a display-relative point onto `buffer` pixels, flooring.
    ///
    /// An axis with no displayed extent maps 1:1.
    pub fn to_buffer(&self, local: Point, buffer: BufferSize) -> PixelPos {
        PixelPos {
            x: scale_axis(local.x, buffer.width, self.width()),
            y: scale_axis(local.y, buffer.height, self.height()),
        }
    }

    /// Buffer dimensions matching the displayed size.
    pub fn buffer_size(&self) -> BufferSize {
        BufferSize {
            width: self.width().max(0.0).round() as u32,
            height: self.height().max(0.0).round() as u32,
        }
    }
}

fn scale_axis(display: f64, buffer_extent: u32, display_extent: f64) -> i32 {
    let scaled = if display_extent > 0.0 {
        display * buffer_extent as f64 / display_extent
    } else {
        display
    };
    scaled.floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halved_display_doubles_coordinates() {
        let display = DisplayBox::new(0.0, 0.0, 400.0, 400.0);
        let pos = display.to_buffer(Point::new(100.0, 100.0), BufferSize::new(800, 800));
        assert_eq!(pos, PixelPos::new(200, 200));
    }

    #[test]
    fn fractional_results_floor() {
        let display = DisplayBox::new(0.0, 0.0, 300.0, 300.0);
        // 10 * 800 / 300 = 26.67
        let pos = display.to_buffer(Point::new(10.0, 10.0), BufferSize::new(800, 800));
        assert_eq!(pos, PixelPos::new(26, 26));
    }

    #[test]
    fn non_uniform_scale_per_axis() {
        let display = DisplayBox::new(5.0, 5.0, 200.0, 100.0);
        let pos = display.to_buffer(Point::new(50.0, 50.0), BufferSize::new(400, 400));
        assert_eq!(pos, PixelPos::new(100, 200));
    }

    #[test]
    fn collapsed_display_maps_one_to_one() {
        let display = DisplayBox::new(0.0, 0.0, 0.0, 0.0);
        let pos = display.to_buffer(Point::new(12.7, 3.2), BufferSize::new(800, 800));
        assert_eq!(pos, PixelPos::new(12, 3));
    }

    #[test]
    fn to_local_subtracts_origin() {
        let display = DisplayBox::new(30.0, 40.0, 100.0, 100.0);
        assert_eq!(display.to_local(Point::new(35.0, 41.5)), Point::new(5.0, 1.5));
    }

    #[test]
    fn buffer_size_rounds_displayed_extent() {
        let display = DisplayBox::new(0.0, 0.0, 399.6, 200.2);
        assert_eq!(display.buffer_size(), BufferSize::new(400, 200));
    }
}
