use super::{Rect, Vec2};

/// Axis-aligned rectangle stored as edges: (left, top, right, bottom).
///
/// This is the layout every GPU record uses for rectangles, clip rects and
/// texture-coordinate rects.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// The all-zero rect. Inside a clip slot it means "unclipped".
    pub const ZERO: Bounds = Bounds::new(0.0, 0.0, 0.0, 0.0);

    /// Full normalized texture space.
    pub const UNIT: Bounds = Bounds::new(0.0, 0.0, 1.0, 1.0);

    #[inline]
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    #[inline]
    pub fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    #[inline]
    pub fn min(self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.min().is_finite() && self.max().is_finite()
    }

    /// Closed containment: `[left, right] × [top, bottom]`.
    #[inline]
    pub fn contains_inclusive(self, p: Vec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Open containment: `(left, right) × (top, bottom)`.
    #[inline]
    pub fn contains_strict(self, p: Vec2) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    #[inline]
    pub fn translate(self, offset: Vec2) -> Self {
        Self::new(
            self.left + offset.x,
            self.top + offset.y,
            self.right + offset.x,
            self.bottom + offset.y,
        )
    }

    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.left * s, self.top * s, self.right * s, self.bottom * s)
    }

    #[inline]
    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.top, self.width(), self.height())
    }
}

impl From<Rect> for Bounds {
    #[inline]
    fn from(r: Rect) -> Self {
        r.to_bounds()
    }
}
