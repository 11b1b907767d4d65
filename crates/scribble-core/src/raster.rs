//! Headless software surface.
//!
//! Strokes are rasterized as capsules: a pixel is painted when its center
//! lies within `width / 2` of the segment. That gives round caps for free and
//! paints a dot for zero-length segments. There is no anti-aliasing, so the
//! output is deterministic and survives a PNG round trip bit-for-bit.

use crate::codec;
use crate::encoded::EncodedImage;
use crate::error::Result;
use crate::geom::{BufferSize, DisplayBox, PixelPos, Segment};
use crate::style::{Rgba8, StrokeStyle};
use crate::surface::Surface;
use image::{Rgba, RgbaImage};
use kurbo::{ParamCurveNearest, Shape};

/// An in-memory RGBA8 surface with a simulated display box.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    display: DisplayBox,
}

impl RasterSurface {
    /// A transparent buffer displayed 1:1 at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        let size = BufferSize::new(width, height);
        Self {
            pixels: RgbaImage::new(width, height),
            display: DisplayBox::unscaled(size),
        }
    }

    /// A buffer shown in a differently-sized display box.
    pub fn with_display(width: u32, height: u32, display: DisplayBox) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            display,
        }
    }

    /// Simulate a layout reflow. Only the reported box changes; the buffer
    /// follows once the sketchpad handles the resize.
    pub fn set_display_box(&mut self, display: DisplayBox) {
        self.display = display;
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, pos: PixelPos) -> Option<Rgba8> {
        let (x, y) = self.index(pos)?;
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Some(Rgba8::new(r, g, b, a))
    }

    /// True when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Number of non-transparent pixels.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.pixels().filter(|p| p.0[3] != 0).count()
    }

    /// Decode an encoded image into this surface's image type.
    pub fn decode(encoded: &EncodedImage) -> Result<RgbaImage> {
        codec::decode(encoded)
    }

    fn index(&self, pos: PixelPos) -> Option<(u32, u32)> {
        let x = u32::try_from(pos.x).ok()?;
        let y = u32::try_from(pos.y).ok()?;
        (x < self.pixels.width() && y < self.pixels.height()).then_some((x, y))
    }
}

impl Surface for RasterSurface {
    type Image = RgbaImage;

    fn buffer_size(&self) -> BufferSize {
        BufferSize::new(self.pixels.width(), self.pixels.height())
    }

    fn display_box(&self) -> DisplayBox {
        self.display
    }

    fn resize_buffer(&mut self, size: BufferSize) {
        log::debug!(
            "raster resize {}x{} -> {}x{}",
            self.pixels.width(),
            self.pixels.height(),
            size.width,
            size.height
        );
        self.pixels = RgbaImage::new(size.width, size.height);
    }

    fn stroke_segment(&mut self, segment: Segment, style: &StrokeStyle) {
        let radius = style.radius();
        let radius_sq = radius * radius;
        let line = segment.to_line();
        let bounds = line.bounding_box().inflate(radius, radius);

        let (w, h) = self.pixels.dimensions();
        let x0 = bounds.x0.floor().max(0.0) as u32;
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let x1 = (bounds.x1.ceil().max(0.0) as u32).min(w);
        let y1 = (bounds.y1.ceil().max(0.0) as u32).min(h);

        let color = style.color;
        for y in y0..y1 {
            for x in x0..x1 {
                let center = PixelPos::new(x as i32, y as i32).center();
                if line.nearest(center, 1e-9).distance_sq <= radius_sq {
                    let dst = self.pixels.get_pixel_mut(x, y);
                    *dst = source_over(color.to_array(), dst.0);
                }
            }
        }
    }

    fn encode(&self) -> Result<EncodedImage> {
        codec::encode_png(&self.pixels)
    }

    fn draw_image(&mut self, image: &RgbaImage) -> Result<()> {
        let w = image.width().min(self.pixels.width());
        let h = image.height().min(self.pixels.height());
        for y in 0..h {
            for x in 0..w {
                let src = image.get_pixel(x, y).0;
                let dst = self.pixels.get_pixel_mut(x, y);
                *dst = source_over(src, dst.0);
            }
        }
        Ok(())
    }
}

/// Porter-Duff source-over on non-premultiplied RGBA8.
fn source_over(src: [u8; 4], dst: [u8; 4]) -> Rgba<u8> {
    match (src[3], dst[3]) {
        (255, _) | (_, 0) => return Rgba(src),
        (0, _) => return Rgba(dst),
        _ => {}
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> StrokeStyle {
        StrokeStyle::PEN
    }

    #[test]
    fn new_surface_is_blank() {
        let surface = RasterSurface::new(32, 32);
        assert!(surface.is_blank());
        assert_eq!(surface.buffer_size(), BufferSize::new(32, 32));
        assert_eq!(surface.display_box(), DisplayBox::new(0.0, 0.0, 32.0, 32.0));
    }

    #[test]
    fn horizontal_segment_paints_a_band() {
        let mut surface = RasterSurface::new(64, 64);
        surface.stroke_segment(
            Segment::new(PixelPos::new(10, 30), PixelPos::new(50, 30)),
            &pen(),
        );
        let color = Some(pen().color);
        assert_eq!(surface.pixel(PixelPos::new(30, 30)), color);
        assert_eq!(surface.pixel(PixelPos::new(30, 26)), color);
        assert_eq!(surface.pixel(PixelPos::new(30, 24)), Some(Rgba8::TRANSPARENT));
        assert_eq!(surface.pixel(PixelPos::new(30, 36)), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn caps_are_round() {
        let mut surface = RasterSurface::new(64, 64);
        surface.stroke_segment(
            Segment::new(PixelPos::new(20, 20), PixelPos::new(40, 20)),
            &pen(),
        );
        // Straight past the end point: inside the cap.
        assert_eq!(surface.pixel(PixelPos::new(43, 19)), Some(pen().color));
        // Diagonal corner of a square cap: outside a round one.
        assert_eq!(surface.pixel(PixelPos::new(44, 15)), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn zero_length_segment_paints_a_dot() {
        let mut surface = RasterSurface::new(32, 32);
        let p = PixelPos::new(16, 16);
        surface.stroke_segment(Segment::new(p, p), &pen());
        assert_eq!(surface.pixel(p), Some(pen().color));
        // A radius-5 disc centered on a pixel corner covers roughly 80 pixels.
        let painted = surface.painted_pixels();
        assert!((70..=90).contains(&painted), "painted {painted}");
    }

    #[test]
    fn strokes_clip_at_the_edges() {
        let mut surface = RasterSurface::new(16, 16);
        surface.stroke_segment(
            Segment::new(PixelPos::new(-20, -20), PixelPos::new(40, 40)),
            &pen(),
        );
        assert_eq!(surface.pixel(PixelPos::new(8, 8)), Some(pen().color));
        assert_eq!(surface.pixel(PixelPos::new(-1, 0)), None);
    }

    #[test]
    fn resize_clears_contents() {
        let mut surface = RasterSurface::new(32, 32);
        surface.stroke_segment(
            Segment::new(PixelPos::new(0, 0), PixelPos::new(31, 31)),
            &pen(),
        );
        assert!(!surface.is_blank());
        surface.resize_buffer(BufferSize::new(40, 20));
        assert_eq!(surface.buffer_size(), BufferSize::new(40, 20));
        assert!(surface.is_blank());
    }

    #[test]
    fn draw_image_is_unscaled_and_clipped() {
        let mut image = RgbaImage::new(8, 8);
        image.put_pixel(7, 7, Rgba([1, 2, 3, 255]));
        image.put_pixel(2, 2, Rgba([4, 5, 6, 255]));

        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&image).unwrap();
        assert_eq!(surface.pixel(PixelPos::new(2, 2)), Some(Rgba8::opaque(4, 5, 6)));
        assert_eq!(surface.painted_pixels(), 1);
    }

    #[test]
    fn transparent_source_leaves_destination() {
        let mut surface = RasterSurface::new(16, 16);
        surface.stroke_segment(
            Segment::new(PixelPos::new(8, 8), PixelPos::new(8, 8)),
            &pen(),
        );
        let before = surface.pixels().clone();
        surface.draw_image(&RgbaImage::new(16, 16)).unwrap();
        assert_eq!(surface.pixels().as_raw(), before.as_raw());
    }

    #[test]
    fn source_over_blends_partial_alpha() {
        let out = source_over([255, 0, 0, 128], [0, 0, 255, 255]);
        assert_eq!(out.0[3], 255);
        assert!(out.0[0] > 120 && out.0[0] < 135);
        assert!(out.0[2] > 120 && out.0[2] < 135);
    }
}
