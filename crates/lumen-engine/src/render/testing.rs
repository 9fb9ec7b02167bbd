//! Offscreen harness for renderer tests.

use crate::coords::Viewport;
use crate::device::{GpuInit, HeadlessGpu, OffscreenTarget};
use crate::prim::EncodedBatch;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::PrimitiveList;
use crate::shade::{DrawContext, FrameUniforms, PipelineConfig};

pub(super) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub(super) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// `None` (with a note on stderr) when the machine has no usable adapter.
pub(super) fn gpu() -> Option<HeadlessGpu> {
    match HeadlessGpu::new_blocking(GpuInit::default()) {
        Ok(gpu) => Some(gpu),
        Err(err) => {
            eprintln!("no GPU adapter, skipping: {err:#}");
            None
        }
    }
}

pub(super) fn draw_context(size: u32, list: &PrimitiveList, config: PipelineConfig) -> DrawContext {
    let uniforms = FrameUniforms::new(Viewport::new(size as f32, size as f32), 1.0)
        .with_max_depth(list.max_depth());
    DrawContext::new(uniforms, config).unwrap()
}

/// Square RGBA8 readback of `draw` over a black, depth-cleared target.
pub(super) struct Frame {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn render(
        gpu: &HeadlessGpu,
        size: u32,
        draw: &DrawContext,
        draw_fn: impl FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    ) -> Frame {
        let target =
            OffscreenTarget::new(gpu.device(), size, size, COLOR_FORMAT, Some(DEPTH_FORMAT));
        let ctx = RenderCtx::new(gpu.device(), gpu.queue(), COLOR_FORMAT, draw)
            .with_depth(DEPTH_FORMAT);

        let mut encoder = gpu.create_encoder();
        target.clear(&mut encoder, wgpu::Color::BLACK);
        {
            let depth_view = target.depth_view().unwrap();
            let mut rt =
                RenderTarget::new(&mut encoder, target.color_view()).with_depth(depth_view);
            draw_fn(&ctx, &mut rt);
        }
        gpu.submit(encoder);

        Frame { size, pixels: gpu.read_pixels(&target).unwrap() }
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.size as usize) + x as usize) * 4;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]]
    }
}

pub(super) fn encode(list: &mut PrimitiveList) -> EncodedBatch {
    list.finish().unwrap().encode().unwrap()
}
