//! Host-side recorder.
//!
//! Responsibilities:
//! - turn immediate-mode calls (fill, stroke, shadow, glyph) into a
//!   [`PrimitiveBatch`](crate::prim::PrimitiveBatch)
//! - track the transform and clip state stacks
//! - assign depths so later `save` scopes draw on top

mod error;
mod list;

pub use error::SceneError;
pub use list::{PrimitiveList, DEFAULT_DEPTH_STEP};
