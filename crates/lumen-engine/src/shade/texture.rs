use crate::coords::Vec2;

use super::ShadeError;

/// CPU-side stand-in for the pass's sampled texture.
///
/// Sampling is nearest-texel with clamp-to-edge addressing over normalized
/// `[0, 1]` coordinates. Single-channel sources return `(r, 0, 0, 1)`, as an
/// `R8Unorm` texture does on the GPU.
pub trait TextureSource {
    /// Size in texels.
    fn size(&self) -> (u32, u32);

    /// Texel at integer coordinates, already in range.
    fn texel(&self, x: u32, y: u32) -> [f32; 4];

    fn sample(&self, uv: Vec2) -> [f32; 4] {
        let (w, h) = self.size();
        if w == 0 || h == 0 {
            return [0.0; 4];
        }
        let x = ((uv.x * w as f32).floor().max(0.0) as u32).min(w - 1);
        let y = ((uv.y * h as f32).floor().max(0.0) as u32).min(h - 1);
        self.texel(x, y)
    }
}

/// Byte offset of texel `(x, y)` in tightly packed rows.
#[inline]
fn texel_index(x: u32, y: u32, width: u32, bytes_per_texel: usize) -> usize {
    (y as usize * width as usize + x as usize) * bytes_per_texel
}

/// One-texel opaque white texture, bound when a pass has nothing to sample.
#[derive(Debug, Copy, Clone, Default)]
pub struct SolidTexture;

impl TextureSource for SolidTexture {
    fn size(&self) -> (u32, u32) {
        (1, 1)
    }

    fn texel(&self, _x: u32, _y: u32) -> [f32; 4] {
        [1.0; 4]
    }
}

/// 8-bit coverage mask (glyph atlas page).
#[derive(Debug, Clone)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaMask {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ShadeError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(ShadeError::TextureDataLength { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }
}

impl TextureSource for AlphaMask {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let v = self.data[texel_index(x, y, self.width, 1)];
        [v as f32 / 255.0, 0.0, 0.0, 1.0]
    }
}

/// 8-bit RGBA image, straight alpha. Also used for RGB subpixel glyph masks.
#[derive(Debug, Clone)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaImage {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ShadeError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(ShadeError::TextureDataLength { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }
}

impl TextureSource for RgbaImage {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn texel(&self, x: u32, y: u32) -> [f32; 4] {
        let i = texel_index(x, y, self.width, 4);
        let px = &self.data[i..i + 4];
        [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
        ]
    }
}
