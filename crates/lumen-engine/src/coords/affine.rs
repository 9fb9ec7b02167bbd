use core::ops::Mul;

use super::Vec2;

/// 2×3 affine transform.
///
/// Coefficients follow the `[a b c d e f]` convention:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// `a..d` hold rotation/scale/skew, `e, f` the translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub coeffs: [f32; 6],
}

impl Affine {
    pub const IDENTITY: Affine = Affine::new([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    #[inline]
    pub const fn new(coeffs: [f32; 6]) -> Self {
        Self { coeffs }
    }

    #[inline]
    pub const fn translate(offset: Vec2) -> Self {
        Self::new([1.0, 0.0, 0.0, 1.0, offset.x, offset.y])
    }

    #[inline]
    pub const fn scale(s: f32) -> Self {
        Self::new([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    #[inline]
    pub const fn scale_non_uniform(sx: f32, sy: f32) -> Self {
        Self::new([sx, 0.0, 0.0, sy, 0.0, 0.0])
    }

    /// Rotation by `radians`; positive angles turn +X towards +Y.
    #[inline]
    pub fn rotate(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new([c, s, -s, c, 0.0, 0.0])
    }

    #[inline]
    pub fn apply(self, p: Vec2) -> Vec2 {
        let [a, b, c, d, e, f] = self.coeffs;
        Vec2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// Same transform without its translation.
    #[inline]
    pub fn linear(self) -> Self {
        let [a, b, c, d, _, _] = self.coeffs;
        Self::new([a, b, c, d, 0.0, 0.0])
    }

    #[inline]
    pub fn translation(self) -> Vec2 {
        Vec2::new(self.coeffs[4], self.coeffs[5])
    }

    #[inline]
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.coeffs.iter().all(|c| c.is_finite())
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `lhs * rhs` applies `rhs` first, then `lhs`.
impl Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        let [a0, b0, c0, d0, e0, f0] = self.coeffs;
        let [a1, b1, c1, d1, e1, f1] = rhs.coeffs;
        Affine::new([
            a0 * a1 + c0 * b1,
            b0 * a1 + d0 * b1,
            a0 * c1 + c0 * d1,
            b0 * c1 + d0 * d1,
            a0 * e1 + c0 * f1 + e0,
            b0 * e1 + d0 * f1 + f0,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn identity_is_noop() {
        let p = Vec2::new(3.0, -7.0);
        assert_eq!(Affine::IDENTITY.apply(p), p);
    }

    #[test]
    fn rotate_quarter_turn() {
        let p = Affine::rotate(core::f32::consts::FRAC_PI_2).apply(Vec2::new(1.0, 0.0));
        assert!(close(p, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn composition_applies_rhs_first() {
        let t = Affine::translate(Vec2::new(10.0, 0.0)) * Affine::scale(2.0);
        assert!(close(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(12.0, 2.0)));

        let t = Affine::scale(2.0) * Affine::translate(Vec2::new(10.0, 0.0));
        assert!(close(t.apply(Vec2::new(1.0, 1.0)), Vec2::new(22.0, 2.0)));
    }

    #[test]
    fn linear_drops_translation() {
        let t = Affine::translate(Vec2::new(5.0, 6.0)) * Affine::scale(3.0);
        assert_eq!(t.translation(), Vec2::new(5.0, 6.0));
        assert_eq!(t.linear(), Affine::scale(3.0));
    }
}
