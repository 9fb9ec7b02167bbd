//! GPU rendering subsystem.
//!
//! Renderers consume encoded primitive batches and issue wgpu commands. Each
//! renderer owns its GPU resources (pipelines, buffers) and creates them on
//! first use.
//!
//! Convention:
//! - instance geometry is in logical pixels (top-left origin, +Y down)
//! - the vertex shader applies transform, translate, scale and projection
//!   from the `Globals` uniform, exactly as `shade` does on the CPU

mod atlas;
mod common;
mod ctx;
mod pass;
mod primitives;
mod subpixel;
#[cfg(test)]
mod testing;

pub use atlas::{
    AtlasError, AtlasFormat, AtlasRegion, AtlasTexture, ShelfAllocator, ATLAS_PADDING,
};
pub use ctx::{RenderCtx, RenderTarget};
pub use primitives::PrimitiveRenderer;
pub use subpixel::SubpixelTextRenderer;
