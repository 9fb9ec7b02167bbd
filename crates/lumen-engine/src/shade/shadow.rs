//! Analytic box shadow.
//!
//! A Gaussian-blurred axis-aligned box is separable: its coverage is the product
//! of two 1D Gaussian CDF differences, one per axis. The CDF is built from a
//! rational approximation of `erf` (max error a few parts in 10⁴).

use crate::coords::{Bounds, Vec2};
use crate::prim::ShadowMode;

/// Rational approximation of the Gauss error function.
#[inline]
pub fn erf_approx(x: f32) -> f32 {
    let s = x.signum();
    let a = x.abs();
    let r = 1.0 + (0.278393 + (0.230389 + 0.078108 * (a * a)) * a) * a;
    let r2 = r * r;
    s - s / (r2 * r2)
}

/// Coverage in `[0, 1]` of the box `[lower, upper]` blurred by `radius`, at `point`.
///
/// `radius` must be positive; see [`shadow_coverage`] for the gated entry point.
pub fn box_shadow(lower: Vec2, upper: Vec2, point: Vec2, radius: f32) -> f32 {
    let k = core::f32::consts::FRAC_1_SQRT_2 / radius;
    let query = [point.x - lower.x, point.y - lower.y, point.x - upper.x, point.y - upper.y];
    let integral = query.map(|q| 0.5 + 0.5 * erf_approx(q * k));
    ((integral[2] - integral[0]) * (integral[3] - integral[1])).clamp(0.0, 1.0)
}

/// Shadow stage: `None` discards the fragment, `Some(c)` scales alpha by `c`.
///
/// A non-positive radius disables attenuation.
pub fn shadow_coverage(caster: Bounds, point: Vec2, radius: f32, mode: ShadowMode) -> Option<f32> {
    if mode == ShadowMode::ExcludeCaster && caster.contains_strict(point) {
        return None;
    }
    if radius <= 0.0 {
        return Some(1.0);
    }
    Some(box_shadow(caster.min(), caster.max(), point, radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASTER: Bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);

    fn cov(p: Vec2, radius: f32) -> f32 {
        box_shadow(CASTER.min(), CASTER.max(), p, radius)
    }

    #[test]
    fn erf_reference_points() {
        assert_eq!(erf_approx(0.0), 0.0);
        assert!((erf_approx(0.5) - 0.5205).abs() < 1e-3);
        assert!((erf_approx(1.0) - 0.8427).abs() < 1e-3);
        assert!((erf_approx(2.0) - 0.9953).abs() < 1e-3);
        assert!((erf_approx(-1.0) + 0.8427).abs() < 1e-3);
    }

    #[test]
    fn center_of_large_box_is_opaque() {
        assert!(cov(Vec2::new(50.0, 50.0), 2.0) > 0.999);
    }

    #[test]
    fn far_outside_is_clear() {
        assert!(cov(Vec2::new(130.0, 50.0), 4.0) < 1e-3);
        assert!(cov(Vec2::new(-30.0, -30.0), 4.0) < 1e-3);
    }

    #[test]
    fn edge_is_half_covered() {
        assert!((cov(Vec2::new(100.0, 50.0), 4.0) - 0.5).abs() < 1e-3);
    }

    #[test]
    fn decreases_moving_away_on_each_axis() {
        let dirs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, -1.0),
        ];
        for dir in dirs {
            let mut prev = cov(Vec2::new(50.0, 50.0), 6.0);
            for step in 1..40 {
                let p = Vec2::new(50.0, 50.0) + dir * (step as f32 * 2.5);
                let c = cov(p, 6.0);
                assert!(c <= prev + 1e-6, "coverage rose at {p:?}: {prev} -> {c}");
                prev = c;
            }
            assert!(prev < 1e-3);
        }
    }

    #[test]
    fn zero_radius_disables_attenuation() {
        let far = Vec2::new(500.0, 500.0);
        assert_eq!(shadow_coverage(CASTER, far, 0.0, ShadowMode::Full), Some(1.0));
    }

    #[test]
    fn exclude_caster_discards_inside_only() {
        let inside = Vec2::new(50.0, 50.0);
        let outside = Vec2::new(103.0, 50.0);
        let edge = Vec2::new(100.0, 50.0);
        assert_eq!(shadow_coverage(CASTER, inside, 4.0, ShadowMode::ExcludeCaster), None);
        assert!(shadow_coverage(CASTER, outside, 4.0, ShadowMode::ExcludeCaster).is_some());
        assert!(shadow_coverage(CASTER, edge, 4.0, ShadowMode::ExcludeCaster).is_some());
        assert!(shadow_coverage(CASTER, inside, 4.0, ShadowMode::Full).unwrap() > 0.99);
    }
}
