use std::fmt;

use crate::coords::Bounds;

/// Pixels left empty around every region so linear filtering never bleeds
/// a neighbour in.
pub const ATLAS_PADDING: u32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub enum AtlasError {
    /// The region can never fit, even in an empty atlas.
    RegionTooLarge { width: u32, height: u32, atlas: u32 },
    /// No shelf space left; the caller should [`AtlasTexture::clear`] and re-upload.
    Full,
    /// Upload data does not match the region size and texel format.
    DataLength { expected: usize, actual: usize },
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtlasError::RegionTooLarge { width, height, atlas } => {
                write!(f, "region {width}x{height} does not fit a {atlas}x{atlas} atlas")
            }
            AtlasError::Full => write!(f, "atlas is full"),
            AtlasError::DataLength { expected, actual } => {
                write!(f, "region data has {actual} bytes, expected {expected}")
            }
        }
    }
}

impl std::error::Error for AtlasError {}

/// Texel format of an atlas page.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AtlasFormat {
    /// Single-channel coverage (`R8Unorm`), for grayscale glyphs.
    Mask,
    /// `Rgba8Unorm`, for images and RGB subpixel glyph masks.
    Rgba,
}

impl AtlasFormat {
    #[inline]
    pub fn bytes_per_texel(self) -> u32 {
        match self {
            AtlasFormat::Mask => 1,
            AtlasFormat::Rgba => 4,
        }
    }

    #[inline]
    pub fn texture_format(self) -> wgpu::TextureFormat {
        match self {
            AtlasFormat::Mask => wgpu::TextureFormat::R8Unorm,
            AtlasFormat::Rgba => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// Texel rectangle inside an atlas.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AtlasRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Row-based packer: regions fill a shelf left to right, a region that does
/// not fit opens a new shelf below the tallest one so far.
#[derive(Debug, Clone)]
pub struct ShelfAllocator {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfAllocator {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: ATLAS_PADDING,
            cursor_y: ATLAS_PADDING,
            row_height: 0,
            full: false,
        }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.size);
    }

    /// A failed allocation leaves the packer untouched, so smaller regions
    /// can still land on the current shelf afterwards.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<AtlasRegion, AtlasError> {
        let usable = self.size.saturating_sub(2 * ATLAS_PADDING);
        if width > usable || height > usable {
            return Err(AtlasError::RegionTooLarge { width, height, atlas: self.size });
        }

        let fits = |x: u32, y: u32| {
            x + width + ATLAS_PADDING <= self.size && y + height + ATLAS_PADDING <= self.size
        };

        let (x, y) = if fits(self.cursor_x, self.cursor_y) {
            (self.cursor_x, self.cursor_y)
        } else {
            let next_y = self.cursor_y + self.row_height + ATLAS_PADDING;
            if !fits(ATLAS_PADDING, next_y) {
                if !self.full {
                    log::warn!("atlas is full ({0}×{0})", self.size);
                    self.full = true;
                }
                return Err(AtlasError::Full);
            }
            self.cursor_y = next_y;
            self.row_height = 0;
            (ATLAS_PADDING, next_y)
        };

        self.cursor_x = x + width + ATLAS_PADDING;
        self.row_height = self.row_height.max(height);
        Ok(AtlasRegion { x, y, width, height })
    }

    /// Normalized `[0, 1]` uv rect of `region`.
    pub fn uv(&self, region: AtlasRegion) -> Bounds {
        let s = self.size as f32;
        Bounds::new(
            region.x as f32 / s,
            region.y as f32 / s,
            (region.x + region.width) as f32 / s,
            (region.y + region.height) as f32 / s,
        )
    }
}

/// Bytes of a tightly packed `width × height` upload.
#[inline]
fn region_byte_len(width: u32, height: u32, bytes_per_texel: u32) -> usize {
    width as usize * height as usize * bytes_per_texel as usize
}

/// Square host-fed texture the batch's uv rects point into.
pub struct AtlasTexture {
    format: AtlasFormat,
    allocator: ShelfAllocator,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl AtlasTexture {
    pub fn new(device: &wgpu::Device, size: u32, format: AtlasFormat) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("lumen atlas"),
            size: wgpu::Extent3d { width: size, height: size, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: format.texture_format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        log::debug!("created {size}×{size} {format:?} atlas");

        Self { format, allocator: ShelfAllocator::new(size), texture, view }
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn format(&self) -> AtlasFormat {
        self.format
    }

    /// Forgets all regions. Texels stay until overwritten.
    pub fn clear(&mut self) {
        self.allocator.clear();
    }

    pub fn allocate(&mut self, width: u32, height: u32) -> Result<AtlasRegion, AtlasError> {
        self.allocator.allocate(width, height)
    }

    /// Uploads tightly packed rows into `region` and returns its uv rect.
    pub fn write_region(
        &self,
        queue: &wgpu::Queue,
        region: AtlasRegion,
        data: &[u8],
    ) -> Result<Bounds, AtlasError> {
        let bpt = self.format.bytes_per_texel();
        let expected = region_byte_len(region.width, region.height, bpt);
        if data.len() != expected {
            return Err(AtlasError::DataLength { expected, actual: data.len() });
        }
        if expected == 0 {
            return Ok(self.allocator.uv(region));
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d { x: region.x, y: region.y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(region.width * bpt),
                rows_per_image: Some(region.height),
            },
            wgpu::Extent3d {
                width: region.width,
                height: region.height,
                depth_or_array_layers: 1,
            },
        );

        Ok(self.allocator.uv(region))
    }

    /// [`allocate`](Self::allocate) then [`write_region`](Self::write_region).
    pub fn upload(
        &mut self,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<Bounds, AtlasError> {
        let expected = region_byte_len(width, height, self.format.bytes_per_texel());
        if data.len() != expected {
            return Err(AtlasError::DataLength { expected, actual: data.len() });
        }
        let region = self.allocate(width, height)?;
        self.write_region(queue, region, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_fill_a_shelf_then_wrap() {
        let mut a = ShelfAllocator::new(16);
        let r0 = a.allocate(6, 4).unwrap();
        let r1 = a.allocate(6, 2).unwrap();
        let r2 = a.allocate(6, 3).unwrap();

        assert_eq!(r0, AtlasRegion { x: 1, y: 1, width: 6, height: 4 });
        assert_eq!(r1, AtlasRegion { x: 8, y: 1, width: 6, height: 2 });
        // Next shelf starts below the tallest region of the first one.
        assert_eq!(r2, AtlasRegion { x: 1, y: 6, width: 6, height: 3 });
    }

    #[test]
    fn full_atlas_stays_full_until_cleared() {
        let mut a = ShelfAllocator::new(8);
        assert!(a.allocate(6, 6).is_ok());
        assert_eq!(a.allocate(6, 6), Err(AtlasError::Full));
        assert_eq!(a.allocate(1, 1), Err(AtlasError::Full));

        a.clear();
        assert!(a.allocate(6, 6).is_ok());
    }

    #[test]
    fn failed_allocation_keeps_the_current_shelf() {
        let region = |x, y, width, height| AtlasRegion { x, y, width, height };
        let mut a = ShelfAllocator::new(32);
        assert_eq!(a.allocate(20, 20), Ok(region(1, 1, 20, 20)));
        assert_eq!(a.allocate(20, 20), Err(AtlasError::Full));
        assert_eq!(a.allocate(5, 5), Ok(region(22, 1, 5, 5)));
        assert_eq!(a.allocate(4, 4), Ok(region(1, 22, 4, 4)));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn upload_length_does_not_wrap() {
        assert_eq!(region_byte_len(70_000, 70_000, 4), 19_600_000_000);
    }

    #[test]
    fn oversized_region_is_rejected_up_front() {
        let mut a = ShelfAllocator::new(8);
        assert_eq!(
            a.allocate(8, 1),
            Err(AtlasError::RegionTooLarge { width: 8, height: 1, atlas: 8 })
        );
    }

    #[test]
    fn uv_is_normalized() {
        let a = ShelfAllocator::new(100);
        let uv = a.uv(AtlasRegion { x: 10, y: 20, width: 30, height: 40 });
        assert_eq!(uv, Bounds::new(0.1, 0.2, 0.4, 0.6));
    }
}
