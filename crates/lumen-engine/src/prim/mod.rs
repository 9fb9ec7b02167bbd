//! Primitive data model.
//!
//! Responsibilities:
//! - the closed set of drawable kinds, as a tagged enum (no magnitude sentinels)
//! - shared per-primitive parameters (transform, translate, clip) in an arena
//!   addressed by lightweight handles
//! - the explicit, versioned GPU encodings the shaders read
//!
//! Extending the model:
//! - add a variant to [`PrimitiveKind`]
//! - give it a `KIND_*` tag in `record`
//! - teach `shade::expand` and `shade::fragment` (and the WGSL twins) about it

mod arena;
mod batch;
mod error;
mod kind;
mod record;

pub use arena::{PrimHandle, PrimitiveArena, PrimitiveParams};
pub use batch::{EncodedBatch, PrimitiveBatch};
pub use error::PrimError;
pub use kind::{GlyphMode, Primitive, PrimitiveKind, ShadowMode};
pub use record::{
    InstanceRecord, PrimitiveRecord, INSTANCE_FLAG_EXCLUDE_CASTER, INSTANCE_RECORD_STRIDE,
    KIND_GLYPH, KIND_IMAGE, KIND_LINE, KIND_MASK, KIND_RECT, KIND_SHADOW, KIND_SUBPIXEL_GLYPH,
    PRIMITIVE_FLAG_CLIP, PRIMITIVE_RECORD_STRIDE, RECORD_LAYOUT_VERSION,
};
