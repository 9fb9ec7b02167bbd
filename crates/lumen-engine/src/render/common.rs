//! Shared GPU types and pipeline pieces used by the primitive renderers.

use bytemuck::{Pod, Zeroable};

use crate::prim::{InstanceRecord, PrimitiveRecord};
use crate::shade::{DepthConvention, DrawContext, ProjectionMode};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// `dst = color · mask + dst · (1 − mask)`, per channel.
pub(super) fn dual_source_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Src1,
            dst_factor: wgpu::BlendFactor::OneMinusSrc1,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::Src1Alpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrc1Alpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── globals uniform ───────────────────────────────────────────────────────

pub(super) const PROJECTION_RESOLUTION: u32 = 0;
pub(super) const PROJECTION_VIEW_PROJECTION: u32 = 1;
pub(super) const DEPTH_ZERO_TO_ONE: u32 = 0;
pub(super) const DEPTH_NEGATIVE_ONE_TO_ONE: u32 = 1;

/// Per-frame uniform block (96 bytes). Mirrors `Globals` in `primitives.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub scale: f32,
    pub max_depth: f32,
    pub projection: u32,
    pub depth_convention: u32,
    pub _pad: [u32; 2],
}

const _: () = assert!(std::mem::size_of::<Globals>() == 96);

impl Globals {
    pub(super) fn from_draw_context(ctx: &DrawContext) -> Self {
        let u = ctx.uniforms();
        let config = ctx.config();
        Self {
            view_proj: u.view_projection.to_cols_array_2d(),
            resolution: u.resolution.to_array(),
            scale: u.scale,
            max_depth: u.max_depth,
            projection: match config.projection {
                ProjectionMode::Resolution => PROJECTION_RESOLUTION,
                ProjectionMode::ViewProjection => PROJECTION_VIEW_PROJECTION,
            },
            depth_convention: match config.depth {
                DepthConvention::ZeroToOne => DEPTH_ZERO_TO_ONE,
                DepthConvention::NegativeOneToOne => DEPTH_NEGATIVE_ONE_TO_ONE,
            },
            _pad: [0; 2],
        }
    }
}

pub(super) fn globals_min_binding_size() -> std::num::NonZeroU64 {
    const SIZE: std::num::NonZeroU64 =
        match std::num::NonZeroU64::new(std::mem::size_of::<Globals>() as u64) {
            Some(size) => size,
            None => panic!("Globals is zero-sized"),
        };
    SIZE
}

pub(super) fn record_min_binding_size() -> std::num::NonZeroU64 {
    const SIZE: std::num::NonZeroU64 =
        match std::num::NonZeroU64::new(std::mem::size_of::<PrimitiveRecord>() as u64) {
            Some(size) => size,
            None => panic!("PrimitiveRecord is zero-sized"),
        };
    SIZE
}

// ── instance layout ───────────────────────────────────────────────────────

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
    0 => Float32x4, // geometry
    1 => Float32x4, // color
    2 => Float32x4, // aux
    3 => Uint32,    // kind_flags
    4 => Uint32,    // prim
    5 => Float32,   // param
    6 => Float32    // depth
];

pub(super) fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<InstanceRecord>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &INSTANCE_ATTRS,
    }
}

// ── depth ─────────────────────────────────────────────────────────────────

/// Larger linear depth maps to smaller device depth under both conventions.
pub(super) fn depth_stencil_state(
    format: Option<wgpu::TextureFormat>,
) -> Option<wgpu::DepthStencilState> {
    format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    })
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;
    use crate::coords::Viewport;
    use crate::shade::{FrameUniforms, PipelineConfig};

    #[test]
    fn globals_follow_context() {
        let config = PipelineConfig {
            projection: ProjectionMode::ViewProjection,
            depth: DepthConvention::NegativeOneToOne,
            ..PipelineConfig::default()
        };
        let vp = Mat4::from_scale(glam::Vec3::new(2.0, 3.0, 1.0));
        let uniforms = FrameUniforms::new(Viewport::new(640.0, 480.0), 2.0)
            .with_view_projection(vp)
            .with_max_depth(4.0);
        let ctx = DrawContext::new(uniforms, config).unwrap();

        let g = Globals::from_draw_context(&ctx);
        assert_eq!(g.resolution, [640.0, 480.0]);
        assert_eq!(g.scale, 2.0);
        assert_eq!(g.max_depth, 4.0);
        assert_eq!(g.projection, PROJECTION_VIEW_PROJECTION);
        assert_eq!(g.depth_convention, DEPTH_NEGATIVE_ONE_TO_ONE);
        assert_eq!(g.view_proj[0][0], 2.0);
        assert_eq!(g.view_proj[1][1], 3.0);
    }

    #[test]
    fn instance_layout_covers_record() {
        let layout = instance_layout();
        assert_eq!(layout.array_stride, 64);
        let last = layout.attributes.last().unwrap();
        assert_eq!(last.offset, 60);
    }
}
