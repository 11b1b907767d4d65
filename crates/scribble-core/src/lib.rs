//! Scribble core: the drawable-surface model and its encoded snapshots.

pub mod codec;
pub mod encoded;
pub mod error;
pub mod geom;
pub mod raster;
pub mod style;
pub mod surface;

pub use encoded::EncodedImage;
pub use error::{Error, Result};
pub use geom::{BufferSize, DisplayBox, PixelPos, Segment};
pub use raster::RasterSurface;
pub use style::{Rgba8, StrokeStyle};
pub use surface::Surface;

// Re-export kurbo so downstream crates build display-space points with the same version
pub use kurbo::Point;
