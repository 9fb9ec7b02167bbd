use crate::shade::DrawContext;

/// Renderer-facing context: device/queue, target formats and the frame's
/// shading context.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// `Some` enables the depth test; the target must then carry a depth view.
    pub depth_format: Option<wgpu::TextureFormat>,
    pub draw: &'a DrawContext,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        draw: &'a DrawContext,
    ) -> Self {
        Self { device, queue, surface_format, depth_format: None, draw }
    }

    #[inline]
    pub fn with_depth(mut self, depth_format: wgpu::TextureFormat) -> Self {
        self.depth_format = Some(depth_format);
        self
    }
}

/// Target for drawing (encoder + color view, optional depth view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view, depth_view: None }
    }

    #[inline]
    pub fn with_depth(mut self, depth_view: &'a wgpu::TextureView) -> Self {
        self.depth_view = Some(depth_view);
        self
    }
}
