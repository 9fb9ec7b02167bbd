use crate::prim::EncodedBatch;
use crate::render::{RenderCtx, RenderTarget};

use super::pass::{PassMode, PrimitivePass};

/// Draws an encoded batch in one instanced call.
///
/// Colors leave the fragment stage premultiplied and blend with
/// `One, OneMinusSrcAlpha`. `texture` is the image or grayscale glyph atlas
/// the batch's uv rects point into; untextured batches pass `None` and get a
/// white texel. Subpixel glyphs drawn here use their red channel as coverage.
pub struct PrimitiveRenderer {
    pass: PrimitivePass,
}

impl Default for PrimitiveRenderer {
    fn default() -> Self {
        Self { pass: PrimitivePass::new(PassMode::Premultiplied) }
    }
}

impl PrimitiveRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &EncodedBatch,
        texture: Option<&wgpu::TextureView>,
    ) {
        self.pass.render(ctx, target, batch, texture);
    }
}
