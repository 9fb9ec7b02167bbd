//! Gamma-corrected glyph coverage.
//!
//! Light text on dark backgrounds and dark text on light backgrounds need
//! different coverage curves to look equally heavy. Coverage is re-solved
//! against the foreground luma, then pushed by a luma-dependent contrast term.

use crate::paint::Color;

/// Below this `|luma − (1 − luma)|` the correction has a pole; coverage stays linear.
pub const GAMMA_DENOMINATOR_EPSILON: f32 = 1e-3;

const GAMMA_LIGHT: f32 = 1.0 / 1.2;
const GAMMA_DARK: f32 = 1.0 / 2.4;
const CONTRAST_LIGHT: f32 = 0.1;
const CONTRAST_DARK: f32 = 0.8;

/// Correction parameters derived once per glyph color.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GammaParams {
    /// Foreground luma, clamped to `[0, 1]`.
    pub luma: f32,
    /// In `[1/2.4, 1/1.2]`; darker text gets the smaller exponent.
    pub gamma: f32,
    /// In `[0.1, 0.8]`; darker text gets more contrast.
    pub contrast: f32,
}

impl GammaParams {
    pub fn for_color(color: Color) -> Self {
        // The luma weights sum to 1.045, so pure white overshoots; clamp keeps
        // the pow base below non-negative.
        let luma = color.luma().clamp(0.0, 1.0);
        let inverse_luma = 1.0 - luma;
        Self {
            luma,
            gamma: mix(GAMMA_LIGHT, GAMMA_DARK, inverse_luma),
            contrast: mix(CONTRAST_LIGHT, CONTRAST_DARK, inverse_luma),
        }
    }
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Corrects one coverage sample. Zero coverage stays zero.
pub fn gamma_correct_alpha(params: GammaParams, alpha: f32) -> f32 {
    if alpha <= 0.0 {
        return 0.0;
    }
    let alpha = alpha.min(1.0);
    let luma = params.luma;
    let inverse_luma = 1.0 - luma;
    let inverse_alpha = 1.0 - alpha;
    let denominator = luma - inverse_luma;

    let mut a = if denominator.abs() < GAMMA_DENOMINATOR_EPSILON {
        alpha
    } else {
        let g = (luma * alpha + inverse_luma * inverse_alpha).powf(params.gamma);
        (g - inverse_luma) / denominator
    };
    a += (1.0 - a) * params.contrast * a;
    a.clamp(0.0, 1.0)
}

/// Per-subpixel coverage for LCD text: each of the mask's R, G, B samples is
/// corrected independently against the same foreground luma.
pub fn subpixel_coverage(color: Color, mask: [f32; 3]) -> [f32; 3] {
    let params = GammaParams::for_color(color);
    mask.map(|m| gamma_correct_alpha(params, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_interpolate_by_inverse_luma() {
        let black = GammaParams::for_color(Color::BLACK);
        assert!((black.gamma - GAMMA_DARK).abs() < 1e-6);
        assert!((black.contrast - CONTRAST_DARK).abs() < 1e-6);

        let white = GammaParams::for_color(Color::WHITE);
        assert_eq!(white.luma, 1.0);
        assert!((white.gamma - GAMMA_LIGHT).abs() < 1e-6);
        assert!((white.contrast - CONTRAST_LIGHT).abs() < 1e-6);
    }

    #[test]
    fn zero_coverage_stays_zero() {
        let colors = [
            Color::BLACK,
            Color::WHITE,
            Color::new(0.5, 0.5, 0.5, 1.0),
            Color::new(0.9, 0.2, 0.4, 1.0),
        ];
        for color in colors {
            assert_eq!(subpixel_coverage(color, [0.0; 3]), [0.0; 3]);
        }
    }

    #[test]
    fn full_coverage_is_full_for_extremes() {
        for color in [Color::BLACK, Color::WHITE] {
            let a = gamma_correct_alpha(GammaParams::for_color(color), 1.0);
            assert!((a - 1.0).abs() < 1e-5, "{color:?} -> {a}");
        }
    }

    #[test]
    fn degenerate_gray_is_finite_and_bounded() {
        let params = GammaParams { luma: 0.5, gamma: 0.6, contrast: 0.45 };
        for alpha in [0.0, 0.1, 0.5, 0.9, 1.0] {
            let a = gamma_correct_alpha(params, alpha);
            assert!(a.is_finite());
            assert!((0.0..=1.0).contains(&a));
        }
        assert_eq!(gamma_correct_alpha(params, 1.0), 1.0);
    }

    #[test]
    fn light_text_is_boosted_dark_text_thinned() {
        let light = GammaParams::for_color(Color::WHITE);
        assert!(gamma_correct_alpha(light, 0.5) > 0.5);
        let dark = GammaParams::for_color(Color::BLACK);
        assert!(gamma_correct_alpha(dark, 0.5) < 0.5);
    }

    #[test]
    fn channels_are_independent() {
        let out = subpixel_coverage(Color::BLACK, [1.0, 0.0, 0.5]);
        assert!(out[0] > 0.99);
        assert_eq!(out[1], 0.0);
        assert!(out[2] > 0.0 && out[2] < 1.0);
    }
}
