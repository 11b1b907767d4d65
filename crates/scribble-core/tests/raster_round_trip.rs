//! Integration tests: draw → encode → decode → draw onto a fresh surface.
//!
//! Exercises the full `scribble-core` pipeline the way a host persists and
//! restores a drawing.

use pretty_assertions::assert_eq;
use scribble_core::{
    BufferSize, EncodedImage, PixelPos, RasterSurface, Segment, StrokeStyle, Surface,
};

const SIZE: BufferSize = BufferSize {
    width: 120,
    height: 90,
};

fn scribble(surface: &mut RasterSurface) {
    let path = [(10, 10), (60, 12), (61, 70), (110, 80), (5, 85)];
    for pair in path.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        surface.stroke_segment(
            Segment::new(PixelPos::new(a.0, a.1), PixelPos::new(b.0, b.1)),
            &StrokeStyle::PEN,
        );
    }
}

#[test]
fn restore_onto_fresh_surface_is_pixel_identical() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut original = RasterSurface::new(SIZE.width, SIZE.height);
    scribble(&mut original);
    assert!(original.painted_pixels() > 0);

    let encoded = original.encode().unwrap();
    let stored = encoded.as_str().to_string();

    let reloaded = EncodedImage::from_stored(&stored).unwrap();
    let decoded = RasterSurface::decode(&reloaded).unwrap();

    let mut restored = RasterSurface::new(SIZE.width, SIZE.height);
    restored.draw_image(&decoded).unwrap();

    assert_eq!(restored.buffer_size(), original.buffer_size());
    assert!(restored.pixels().as_raw() == original.pixels().as_raw());
}

#[test]
fn restore_keeps_native_size_on_a_larger_surface() {
    let mut original = RasterSurface::new(20, 20);
    original.stroke_segment(
        Segment::new(PixelPos::new(0, 10), PixelPos::new(19, 10)),
        &StrokeStyle::PEN,
    );
    let decoded = RasterSurface::decode(&original.encode().unwrap()).unwrap();

    let mut larger = RasterSurface::new(40, 40);
    larger.draw_image(&decoded).unwrap();

    assert_eq!(larger.painted_pixels(), original.painted_pixels());
    assert_eq!(larger.pixel(PixelPos::new(30, 10)).map(|c| c.a), Some(0));
}

#[test]
fn blank_surface_round_trips_blank() {
    let blank = RasterSurface::new(8, 8);
    let decoded = RasterSurface::decode(&blank.encode().unwrap()).unwrap();
    let mut restored = RasterSurface::new(8, 8);
    restored.draw_image(&decoded).unwrap();
    assert!(restored.is_blank());
}
