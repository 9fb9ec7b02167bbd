/// Straight (non-premultiplied) linear RGBA color.
///
/// This is the author-facing form stored in primitive records. The fragment
/// stage premultiplies right before blending (see [`Color::premultiplied`]).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Luma weights for text gamma correction.
///
/// Tuned for glyph contrast rather than taken from BT.601/709.
pub const LUMA_WEIGHTS: [f32; 3] = [0.25, 0.72, 0.075];

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from straight sRGB-encoded bytes (`0`–`255`).
    ///
    /// Bytes are mapped linearly to `[0, 1]`; no transfer function is applied.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied `[r·a, g·a, b·a, a]` with every channel clamped to `[0, 1]`.
    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [
            self.r.clamp(0.0, 1.0) * a,
            self.g.clamp(0.0, 1.0) * a,
            self.b.clamp(0.0, 1.0) * a,
            a,
        ]
    }

    /// Perceptual luma of the RGB channels, using [`LUMA_WEIGHTS`].
    #[inline]
    pub fn luma(self) -> f32 {
        let [wr, wg, wb] = LUMA_WEIGHTS;
        wr * self.r + wg * self.g + wb * self.b
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}
