//! keyraster is a minimal 2D motion-graphics renderer.
//!
//! Scalar channels are animated with eased keyframes, lines and shapes are
//! rasterized into float pixel grids, and layers are summed into one frame
//! per animation tick.
//!
//! # Pipeline overview
//!
//! 1. **Animate**: [`KeyframeTrack::interpolate`] maps a time to a value through an [`Ease`].
//! 2. **Rasterize**: line layers scan segments whose endpoints may follow tracks;
//!    shape layers test every pixel against their [`Geometry`].
//! 3. **Composite**: a [`CompositeLayer`] renders each child into a scratch grid
//!    and adds it into the target.
//! 4. **Export**: [`render_frames_to_dir`] writes one 8-bit image per frame.
//!
//! All tracks and layers live in a [`Scene`] and refer to each other by
//! [`TrackId`] / [`LayerId`].
//!
//! Y grows upward for geometry and line coordinates; grids store rows top-down.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation {
    pub mod ease;
    pub mod preview;
    pub mod track;
}
mod assets {
    pub mod decode;
    pub mod encode;
}
mod foundation {
    pub mod core;
    pub mod error;
    pub(crate) mod math;
}
mod raster {
    pub mod grid;
    pub mod line;
    pub mod pixel;
}
mod render {
    pub mod pipeline;
}
mod scene {
    pub mod layer;
    pub mod store;
}
mod shape {
    pub mod geometry;
}

pub mod demo;

pub use animation::ease::{EASE_SENTINEL, Ease};
pub use animation::preview::{DEFAULT_PREVIEW_RES, preview_ease};
pub use animation::track::{Keyframe, KeyframeTrack, TRACK_SENTINEL};
pub use assets::decode::{SampleFormat, decode_image, load_image};
pub use assets::encode::{encode_rgb8, ensure_parent_dir, write_image};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Vec2};
pub use foundation::error::{KeyrasterError, KeyrasterResult};
pub use raster::grid::PixelGrid;
pub use raster::line::{LineScan, LineSegment, rasterize_line};
pub use raster::pixel::{CHANNEL_SENTINEL, Rgba};
pub use render::pipeline::{RenderSettings, frame_file_name, render_frame, render_frames_to_dir};
pub use scene::layer::{
    AnimatedLineSegment, CompositeLayer, Layer, LayerKind, LineLayer, ShapeLayer,
    TimeWindowPolicy,
};
pub use scene::store::{LayerId, Scene, TrackId};
pub use shape::geometry::{Barycentric, Geometry, Quad, TexturedQuad, Triangle};
