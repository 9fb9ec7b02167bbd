use super::{Bounds, Vec2};

/// Origin + size rectangle in logical pixels (top-left origin).
///
/// This is the form hosts hand to the recorder; GPU records and the shading
/// stages use [`Bounds`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    /// Flips negative width/height so the size is non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (x, w) = if self.size.x < 0.0 {
            (self.origin.x + self.size.x, -self.size.x)
        } else {
            (self.origin.x, self.size.x)
        };
        let (y, h) = if self.size.y < 0.0 {
            (self.origin.y + self.size.y, -self.size.y)
        } else {
            (self.origin.y, self.size.y)
        };
        Rect::new(x, y, w, h)
    }

    /// Half-open containment `[min, max)`, for hit-testing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let b = self.to_bounds();
        p.x >= b.left && p.y >= b.top && p.x < b.right && p.y < b.bottom
    }

    /// Grows by `dx` left and right and `dy` top and bottom. Negative amounts
    /// shrink; the result is not normalized.
    #[inline]
    pub fn inflate(self, dx: f32, dy: f32) -> Self {
        Rect::new(
            self.origin.x - dx,
            self.origin.y - dy,
            self.size.x + 2.0 * dx,
            self.size.y + 2.0 * dy,
        )
    }

    /// Edge form (left, top, right, bottom).
    #[inline]
    pub fn to_bounds(self) -> Bounds {
        let r = self.normalized();
        Bounds::new(r.origin.x, r.origin.y, r.origin.x + r.size.x, r.origin.y + r.size.y)
    }

    /// Overlap of two rects; `None` when they only touch or are disjoint.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.to_bounds();
        let b = other.to_bounds();
        let overlap = Bounds::new(
            a.left.max(b.left),
            a.top.max(b.top),
            a.right.min(b.right),
            a.bottom.min(b.bottom),
        );
        (overlap.width() > 0.0 && overlap.height() > 0.0).then(|| overlap.to_rect())
    }
}
