use crate::coords::{Bounds, Vec2};

/// An active clip rect that contains no point.
///
/// Stands in for clip rects that end up at non-positive right/bottom after
/// translate and scale: such a rect covers nothing on screen, but written as-is
/// it would read as the "unclipped" sentinel.
pub const CLIP_REJECT_ALL: Bounds = Bounds::new(f32::MAX, f32::MAX, 1.0, 1.0);

/// A clip rect is active when its right and bottom edges are positive.
/// Anything else (notably the all-zero rect) means "unclipped".
#[inline]
pub fn clip_is_active(clip: Bounds) -> bool {
    clip.right > 0.0 && clip.bottom > 0.0
}

/// Whether a fragment at `point` (physical pixels, top-left origin) is dropped.
///
/// Edges are inclusive.
#[inline]
pub fn clip_discards(clip: Bounds, point: Vec2) -> bool {
    clip_is_active(clip) && !clip.contains_inclusive(point)
}
