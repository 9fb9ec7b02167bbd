use glam::Mat4;

use crate::coords::Viewport;

use super::ShadeError;

/// How the vertex stage reaches clip space.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ProjectionMode {
    /// UI space without a camera:
    /// `ndc = (screen / resolution · 2 − 1) · (1, −1)`.
    ///
    /// The Y flip maps top-left-origin, Y-down layout onto Y-up NDC.
    #[default]
    Resolution,
    /// `clip = view_projection · (screen, 0, 1)`.
    ViewProjection,
}

/// Mapping from linear primitive depth to device depth.
///
/// Both conventions put larger linear depth nearer the viewer, so primitives
/// recorded later (deeper in the save stack) win a `LessEqual` depth test.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum DepthConvention {
    /// `1 − depth / max_depth`, for APIs with a `[0, 1]` depth range (wgpu, Vulkan, Metal).
    #[default]
    ZeroToOne,
    /// `−depth / max_depth`, for APIs with a `[−1, 1]` depth range (OpenGL).
    ///
    /// The wgpu renderers fold this into `[0, 1]` with [`unit_range_depth`].
    ///
    /// [`unit_range_depth`]: super::unit_range_depth
    NegativeOneToOne,
}

/// Pipeline-construction-time choices.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub projection: ProjectionMode,
    pub depth: DepthConvention,
    /// Emit per-channel coverage through dual-source blending. When off,
    /// subpixel glyphs degrade to grayscale coverage.
    pub subpixel_text: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionMode::Resolution,
            depth: DepthConvention::ZeroToOne,
            subpixel_text: true,
        }
    }
}

/// Per-frame uniforms, owned by the frame controller.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameUniforms {
    /// Target size in physical pixels.
    pub resolution: Viewport,
    /// Device-pixel ratio applied after translate.
    pub scale: f32,
    /// Only read in [`ProjectionMode::ViewProjection`].
    pub view_projection: Mat4,
    /// Normalizer for primitive depth.
    pub max_depth: f32,
}

impl FrameUniforms {
    pub fn new(resolution: Viewport, scale: f32) -> Self {
        Self { resolution, scale, view_projection: Mat4::IDENTITY, max_depth: 1.0 }
    }

    pub fn with_view_projection(mut self, view_projection: Mat4) -> Self {
        self.view_projection = view_projection;
        self
    }

    pub fn with_max_depth(mut self, max_depth: f32) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Immutable per-draw context handed to every stage.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawContext {
    uniforms: FrameUniforms,
    config: PipelineConfig,
}

impl DrawContext {
    /// Validates the uniforms so no stage has to guard against zero divisors.
    pub fn new(uniforms: FrameUniforms, config: PipelineConfig) -> Result<Self, ShadeError> {
        if !uniforms.resolution.is_valid() {
            return Err(ShadeError::InvalidResolution {
                width: uniforms.resolution.width,
                height: uniforms.resolution.height,
            });
        }
        if !(uniforms.scale > 0.0 && uniforms.scale.is_finite()) {
            return Err(ShadeError::InvalidScale(uniforms.scale));
        }
        if !(uniforms.max_depth > 0.0 && uniforms.max_depth.is_finite()) {
            return Err(ShadeError::InvalidMaxDepth(uniforms.max_depth));
        }
        Ok(Self { uniforms, config })
    }

    #[inline]
    pub fn uniforms(&self) -> &FrameUniforms {
        &self.uniforms
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
