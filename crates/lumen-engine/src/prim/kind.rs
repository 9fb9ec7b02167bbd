use crate::coords::{Bounds, Vec2};
use crate::paint::Color;

use super::PrimHandle;

/// How a shadow primitive treats the area under its caster.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ShadowMode {
    /// Shade the whole blurred quad, including the region under the caster.
    #[default]
    Full,
    /// Discard fragments strictly inside the caster rect. Use this when the
    /// caster is drawn by its own fill primitive and may be translucent.
    ExcludeCaster,
}

/// Glyph coverage interpretation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum GlyphMode {
    /// Single-channel mask; coverage comes from the red channel.
    #[default]
    Grayscale,
    /// Per-subpixel RGB coverage, gamma corrected and emitted through
    /// dual-source blending.
    Subpixel,
}

/// The effective kind of a primitive, with the geometry that kind needs.
///
/// Rect-like kinds carry `bounds` in local space (before transform/translate).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PrimitiveKind {
    /// Flat color fill.
    Rect { bounds: Bounds },
    /// Stroked segment, expanded around the `from → to` centerline.
    Line { from: Vec2, to: Vec2, width: f32 },
    /// Soft shadow of `caster`, drawn over the (already inflated) `bounds`.
    Shadow { bounds: Bounds, caster: Bounds, radius: f32, mode: ShadowMode },
    /// RGBA image sampled over `uv`, tinted by the primitive color.
    Image { bounds: Bounds, uv: Bounds },
    /// Glyph mask sampled over `uv`.
    Glyph { bounds: Bounds, uv: Bounds, mode: GlyphMode },
}

impl PrimitiveKind {
    /// Whether the fragment stage samples the bound texture for this kind.
    #[inline]
    pub fn is_textured(&self) -> bool {
        matches!(self, PrimitiveKind::Image { .. } | PrimitiveKind::Glyph { .. })
    }

    /// Texture rect for textured kinds.
    #[inline]
    pub fn uv(&self) -> Option<Bounds> {
        match *self {
            PrimitiveKind::Image { uv, .. } | PrimitiveKind::Glyph { uv, .. } => Some(uv),
            _ => None,
        }
    }

    /// Local-space bounding box of the geometry (lines include their width).
    pub fn local_bounds(&self) -> Bounds {
        match *self {
            PrimitiveKind::Rect { bounds }
            | PrimitiveKind::Shadow { bounds, .. }
            | PrimitiveKind::Image { bounds, .. }
            | PrimitiveKind::Glyph { bounds, .. } => bounds,
            PrimitiveKind::Line { from, to, width } => {
                let h = width * 0.5;
                Bounds::new(
                    from.x.min(to.x) - h,
                    from.y.min(to.y) - h,
                    from.x.max(to.x) + h,
                    from.y.max(to.y) + h,
                )
            }
        }
    }
}

/// One drawable instance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// Straight-alpha color. Textured kinds use it as a tint.
    pub color: Color,
    /// Linear depth, normalized by the frame's `max_depth` in the vertex stage.
    pub depth: f32,
    /// Shared parameters in the batch arena.
    pub params: PrimHandle,
}

impl Primitive {
    #[inline]
    pub fn new(kind: PrimitiveKind, color: Color, depth: f32, params: PrimHandle) -> Self {
        Self { kind, color, depth, params }
    }
}
