//! The drawable-surface capability the sketchpad operates on.

use crate::encoded::EncodedImage;
use crate::error::Result;
use crate::geom::{BufferSize, DisplayBox, Segment};
use crate::style::StrokeStyle;

/// A host-owned 2D raster the sketchpad draws on.
///
/// Implemented by the browser canvas in `scribble-wasm` and by
/// [`RasterSurface`](crate::raster::RasterSurface) for headless use.
pub trait Surface {
    /// The host's decoded-image type, ready for [`Surface::draw_image`].
    type Image;

    /// Internal pixel dimensions.
    fn buffer_size(&self) -> BufferSize;

    /// Current on-screen box. Re-queried after every layout change.
    fn display_box(&self) -> DisplayBox;

    /// Change the pixel dimensions. Existing contents are discarded.
    fn resize_buffer(&mut self, size: BufferSize);

    /// Paint one straight segment.
    fn stroke_segment(&mut self, segment: Segment, style: &StrokeStyle);

    /// Snapshot the whole buffer.
    fn encode(&self) -> Result<EncodedImage>;

    /// Composite `image` at the origin at its native size, without scaling.
    fn draw_image(&mut self, image: &Self::Image) -> Result<()>;
}
