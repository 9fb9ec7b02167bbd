//! Coordinate and geometry types shared across the shading stages and renderers.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The vertex stage multiplies by the frame scale to reach physical pixels and
//! then converts to NDC (see `shade::project`).

mod affine;
mod bounds;
mod rect;
mod vec2;
mod viewport;

pub use affine::Affine;
pub use bounds::Bounds;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
