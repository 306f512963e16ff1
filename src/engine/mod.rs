//! The four-stage wall pipeline.
//!
//! ```text
//! Wall ──transform──▶ TranslatedWall ──clip──▶ ClippedWall
//!      ──project───▶ ScreenCoords   ──renderer::software::rasterize──▶ pixels
//! ```
//!
//! Each stage is a pure function over slices; [`Pipeline`] owns the
//! scratch buffers between them.

pub mod clip;
pub mod math;
pub mod pipeline;
pub mod projection;
pub mod transform;
pub mod types;

pub use pipeline::Pipeline;
pub use types::{ClippedWall, Frustum, ScreenCoords, TranslatedWall, Viewport};
