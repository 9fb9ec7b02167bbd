use crate::coords::{Bounds, Vec2};
use crate::prim::{Primitive, PrimitiveKind, PrimitiveParams};

/// Quad corner addressed by the per-vertex ordinal.
///
/// Ordinals follow triangle-strip order, so four vertices `0..4` cover the quad.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] =
        [Corner::TopLeft, Corner::TopRight, Corner::BottomLeft, Corner::BottomRight];

    /// `None` for ordinals outside `0..=3`. The GPU path never produces those.
    #[inline]
    pub fn from_ordinal(ordinal: u32) -> Option<Corner> {
        Self::ALL.get(ordinal as usize).copied()
    }

    #[inline]
    pub fn ordinal(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn is_right(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    #[inline]
    pub fn is_bottom(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::BottomRight)
    }
}

/// One expanded corner of a primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExpandedVertex {
    /// Local position before transform and translate.
    pub local: Vec2,
    /// After transform and translate, before the frame scale.
    pub world: Vec2,
    /// Local position moved by translate only. Shadow rects live in this space.
    pub untransformed: Vec2,
    /// Texture coordinate (zero for untextured kinds).
    pub uv: Vec2,
}

/// `0 → (left, top)`, `1 → (right, top)`, `2 → (left, bottom)`, `3 → (right, bottom)`.
#[inline]
pub fn expand_rect(b: Bounds, corner: Corner) -> Vec2 {
    Vec2::new(
        if corner.is_right() { b.right } else { b.left },
        if corner.is_bottom() { b.bottom } else { b.top },
    )
}

/// Pushes a centerline vertex half the stroke width along its outward normal.
#[inline]
pub fn expand_stroke_vertex(base: Vec2, translate: Vec2, normal: Vec2, width: f32) -> Vec2 {
    base + translate + normal * 0.5 * width
}

/// Corner of the stroke quad around `from → to`.
///
/// Left corners sit on `from`, right corners on `to`; top corners are offset
/// along the segment normal, bottom corners against it. A zero-length segment
/// has no normal and collapses to a point.
#[inline]
pub fn expand_line(from: Vec2, to: Vec2, width: f32, corner: Corner) -> Vec2 {
    let normal = (to - from).normalize_or_zero().perp();
    let base = if corner.is_right() { to } else { from };
    let normal = if corner.is_bottom() { -normal } else { normal };
    expand_stroke_vertex(base, Vec2::zero(), normal, width)
}

/// Expands `prim` at `corner` and applies its shared parameters.
pub fn expand(prim: &Primitive, params: &PrimitiveParams, corner: Corner) -> ExpandedVertex {
    let local = match prim.kind {
        PrimitiveKind::Line { from, to, width } => expand_line(from, to, width, corner),
        kind => expand_rect(kind.local_bounds(), corner),
    };

    let transformed = match params.transform {
        Some(t) => t.apply(local),
        None => local,
    };

    let uv = prim.kind.uv().map_or(Vec2::zero(), |uv| expand_rect(uv, corner));

    ExpandedVertex {
        local,
        world: transformed + params.translate,
        untransformed: local + params.translate,
        uv,
    }
}
