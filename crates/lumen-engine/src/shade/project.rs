use glam::Vec4;

use crate::coords::{Bounds, Vec2, Viewport};

use super::{DepthConvention, DrawContext, ProjectionMode};

/// Logical → physical pixels.
#[inline]
pub fn to_screen(world: Vec2, scale: f32) -> Vec2 {
    world * scale
}

/// Moves a pre-translate rect (clip, shadow caster) by the same translate and
/// scale the primitive's vertices get.
#[inline]
pub fn screen_clip(rect: Bounds, translate: Vec2, scale: f32) -> Bounds {
    rect.translate(translate).scale(scale)
}

/// `(screen / resolution · 2 − 1) · (1, −1)`.
#[inline]
pub fn ndc_from_screen(screen: Vec2, resolution: Viewport) -> Vec2 {
    Vec2::new(
        screen.x / resolution.width * 2.0 - 1.0,
        -(screen.y / resolution.height * 2.0 - 1.0),
    )
}

/// Linear depth → device depth for the selected convention.
#[inline]
pub fn device_depth(depth: f32, max_depth: f32, convention: DepthConvention) -> f32 {
    match convention {
        DepthConvention::ZeroToOne => 1.0 - depth / max_depth,
        DepthConvention::NegativeOneToOne => -depth / max_depth,
    }
}

/// Device depth → the `[0, 1]` range wgpu keeps after clipping.
///
/// [`DepthConvention::NegativeOneToOne`] values are remapped with
/// `z · 0.5 + 0.5`; order is preserved, so the depth test is unaffected.
/// The GPU pass applies this on top of [`project_position`].
#[inline]
pub fn unit_range_depth(z: f32, convention: DepthConvention) -> f32 {
    match convention {
        DepthConvention::ZeroToOne => z,
        DepthConvention::NegativeOneToOne => z * 0.5 + 0.5,
    }
}

/// World position + linear depth → homogeneous clip-space position.
///
/// Depth is written after projection and pre-multiplied by `w`, so the
/// perspective divide yields exactly [`device_depth`].
pub fn project_position(ctx: &DrawContext, world: Vec2, depth: f32) -> [f32; 4] {
    let u = ctx.uniforms();
    let screen = to_screen(world, u.scale);
    let z = device_depth(depth, u.max_depth, ctx.config().depth);

    match ctx.config().projection {
        ProjectionMode::Resolution => {
            let ndc = ndc_from_screen(screen, u.resolution);
            [ndc.x, ndc.y, z, 1.0]
        }
        ProjectionMode::ViewProjection => {
            let clip = u.view_projection * Vec4::new(screen.x, screen.y, 0.0, 1.0);
            [clip.x, clip.y, z * clip.w, clip.w]
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::shade::{FrameUniforms, PipelineConfig};

    fn ctx(res: f32, scale: f32, config: PipelineConfig) -> DrawContext {
        let u = FrameUniforms::new(Viewport::new(res, res), scale).with_max_depth(10.0);
        DrawContext::new(u, config).unwrap()
    }

    #[test]
    fn viewport_center_maps_to_origin() {
        let c = ctx(200.0, 1.0, PipelineConfig::default());
        let p = project_position(&c, Vec2::new(100.0, 100.0), 0.0);
        assert_eq!([p[0], p[1]], [0.0, 0.0]);
    }

    #[test]
    fn top_left_maps_to_upper_left_ndc() {
        let ndc = ndc_from_screen(Vec2::new(0.0, 0.0), Viewport::new(200.0, 100.0));
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = ndc_from_screen(Vec2::new(200.0, 100.0), Viewport::new(200.0, 100.0));
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn increasing_y_decreases_ndc_y() {
        let res = Viewport::new(300.0, 300.0);
        let upper = ndc_from_screen(Vec2::new(50.0, 10.0), res);
        let lower = ndc_from_screen(Vec2::new(50.0, 250.0), res);
        assert_eq!(upper.x, lower.x);
        assert!(lower.y < upper.y);
    }

    #[test]
    fn scale_applies_before_normalization() {
        let c = ctx(200.0, 2.0, PipelineConfig::default());
        let p = project_position(&c, Vec2::new(50.0, 50.0), 0.0);
        assert_eq!([p[0], p[1]], [0.0, 0.0]);
    }

    #[test]
    fn depth_conventions() {
        assert_eq!(device_depth(0.0, 10.0, DepthConvention::ZeroToOne), 1.0);
        assert_eq!(device_depth(5.0, 10.0, DepthConvention::ZeroToOne), 0.5);
        assert_eq!(device_depth(0.0, 10.0, DepthConvention::NegativeOneToOne), 0.0);
        assert_eq!(device_depth(5.0, 10.0, DepthConvention::NegativeOneToOne), -0.5);
    }

    #[test]
    fn nested_depths_stay_inside_wgpu_range() {
        for convention in [DepthConvention::ZeroToOne, DepthConvention::NegativeOneToOne] {
            let mut prev = f32::INFINITY;
            for depth in [0.0, 1.0, 5.0, 10.0] {
                let z = unit_range_depth(device_depth(depth, 10.0, convention), convention);
                assert!((0.0..=1.0).contains(&z), "{convention:?} depth {depth} -> {z}");
                assert!(z < prev);
                prev = z;
            }
        }
        assert_eq!(unit_range_depth(-1.0, DepthConvention::NegativeOneToOne), 0.0);
        assert_eq!(unit_range_depth(0.25, DepthConvention::ZeroToOne), 0.25);
    }

    #[test]
    fn view_projection_identity_passes_screen_through() {
        let config = PipelineConfig {
            projection: ProjectionMode::ViewProjection,
            depth: DepthConvention::NegativeOneToOne,
            ..PipelineConfig::default()
        };
        let c = ctx(100.0, 2.0, config);
        let p = project_position(&c, Vec2::new(3.0, 4.0), 5.0);
        assert_eq!(p, [6.0, 8.0, -0.5, 1.0]);
    }

    #[test]
    fn view_projection_depth_survives_divide() {
        let config = PipelineConfig {
            projection: ProjectionMode::ViewProjection,
            ..PipelineConfig::default()
        };
        let u = FrameUniforms::new(Viewport::new(100.0, 100.0), 1.0)
            .with_max_depth(4.0)
            .with_view_projection(Mat4::from_diagonal(Vec4::new(1.0, 1.0, 1.0, 2.0)));
        let c = DrawContext::new(u, config).unwrap();
        let p = project_position(&c, Vec2::new(2.0, 2.0), 1.0);
        assert_eq!(p[3], 2.0);
        assert!((p[2] / p[3] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn clip_rect_follows_translate_and_scale() {
        let b = screen_clip(Bounds::new(0.0, 0.0, 10.0, 10.0), Vec2::new(5.0, 5.0), 2.0);
        assert_eq!(b, Bounds::new(10.0, 10.0, 30.0, 30.0));
    }
}
