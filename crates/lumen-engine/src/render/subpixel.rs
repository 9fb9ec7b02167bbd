use crate::prim::EncodedBatch;
use crate::render::{RenderCtx, RenderTarget};

use super::pass::{PassMode, PrimitivePass};
use super::PrimitiveRenderer;

/// LCD text through dual-source blending.
///
/// Subpixel glyphs sample an RGB coverage atlas; each channel is
/// gamma-corrected against the text color and used as its own blend factor.
/// Other kinds in the same batch emit a uniform mask and come out as in
/// [`PrimitiveRenderer`]. Without `Features::DUAL_SOURCE_BLENDING`, or with subpixel
/// text turned off in the pipeline config, the batch goes through the
/// grayscale path instead.
pub struct SubpixelTextRenderer {
    pass: PrimitivePass,
    fallback: PrimitiveRenderer,
    warned_unsupported: bool,
}

impl Default for SubpixelTextRenderer {
    fn default() -> Self {
        Self {
            pass: PrimitivePass::new(PassMode::DualSource),
            fallback: PrimitiveRenderer::new(),
            warned_unsupported: false,
        }
    }
}

impl SubpixelTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_supported(device: &wgpu::Device) -> bool {
        device.features().contains(wgpu::Features::DUAL_SOURCE_BLENDING)
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &EncodedBatch,
        atlas: Option<&wgpu::TextureView>,
    ) {
        if !ctx.draw.config().subpixel_text {
            self.fallback.render(ctx, target, batch, atlas);
            return;
        }

        if !Self::is_supported(ctx.device) {
            if !self.warned_unsupported {
                log::warn!(
                    "dual-source blending unavailable; subpixel text falls back to grayscale"
                );
                self.warned_unsupported = true;
            }
            self.fallback.render(ctx, target, batch, atlas);
            return;
        }

        self.pass.render(ctx, target, batch, atlas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Bounds, Rect};
    use crate::paint::Color;
    use crate::prim::{GlyphMode, ShadowMode};
    use crate::render::testing::{draw_context, encode, gpu, Frame};
    use crate::scene::PrimitiveList;
    use crate::shade::PipelineConfig;

    #[test]
    fn mixed_batch_matches_premultiplied_pass() {
        let Some(gpu) = gpu() else { return };
        if !gpu.supports_dual_source() {
            eprintln!("dual-source blending unsupported, skipping");
            return;
        }

        let mut list = PrimitiveList::new();
        let caster = Rect::new(40.0, 40.0, 10.0, 10.0);
        list.blurred_rect(caster, 2.0, Color::WHITE, ShadowMode::Full).unwrap();
        list.fill_rect(Rect::new(0.0, 56.0, 8.0, 8.0), Color::new(1.0, 0.0, 0.0, 0.5)).unwrap();
        let glyph = Rect::new(0.0, 0.0, 8.0, 8.0);
        list.draw_glyph(glyph, Bounds::UNIT, Color::WHITE, GlyphMode::Subpixel).unwrap();
        let draw = draw_context(64, &list, PipelineConfig::default());
        let batch = encode(&mut list);

        let plain = Frame::render(&gpu, 64, &draw, |ctx, target| {
            PrimitiveRenderer::new().render(ctx, target, &batch, None);
        });
        let dual = Frame::render(&gpu, 64, &draw, |ctx, target| {
            SubpixelTextRenderer::new().render(ctx, target, &batch, None);
        });

        // Shadow tail, half-covered rect, glyph.
        for (x, y) in [(35, 35), (38, 45), (45, 45), (4, 60), (4, 4)] {
            let (a, b) = (plain.pixel(x, y), dual.pixel(x, y));
            for c in 0..4 {
                assert!(a[c].abs_diff(b[c]) <= 2, "({x}, {y}): {a:?} vs {b:?}");
            }
        }
        assert!(dual.pixel(35, 35)[0] < 128);
    }
}
