//! GPU encodings.
//!
//! WGSL has no tagged unions, so the encoding uses an explicit kind tag plus
//! two kind-specific slots (`aux`, `param`). Both layouts are mirrored in
//! `render/shaders/primitives.wgsl`; bump [`RECORD_LAYOUT_VERSION`] whenever
//! a field moves.

use bytemuck::{Pod, Zeroable};

use crate::coords::Bounds;

use super::{GlyphMode, Primitive, PrimitiveKind, PrimitiveParams, ShadowMode};

pub const RECORD_LAYOUT_VERSION: u32 = 1;

pub const KIND_RECT: u32 = 0;
pub const KIND_LINE: u32 = 1;
pub const KIND_SHADOW: u32 = 2;
pub const KIND_IMAGE: u32 = 3;
pub const KIND_GLYPH: u32 = 4;
pub const KIND_SUBPIXEL_GLYPH: u32 = 5;

/// Low byte of `kind_flags` holds the kind tag; the rest are flags.
pub const KIND_MASK: u32 = 0xff;
/// Shadow discards fragments strictly inside its caster.
pub const INSTANCE_FLAG_EXCLUDE_CASTER: u32 = 1 << 8;

/// Per-instance record (64 bytes):
///
///  offset  0  geometry    [f32; 4]  rect LTRB, or line x0 y0 x1 y1
///  offset 16  color       [f32; 4]  straight alpha
///  offset 32  aux         [f32; 4]  uv rect (textured) / caster LTRB (shadow)
///  offset 48  kind_flags  u32
///  offset 52  prim        u32       arena index
///  offset 56  param       f32       stroke width / blur radius
///  offset 60  depth       f32       linear depth
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceRecord {
    pub geometry: [f32; 4],
    pub color: [f32; 4],
    pub aux: [f32; 4],
    pub kind_flags: u32,
    pub prim: u32,
    pub param: f32,
    pub depth: f32,
}

pub const INSTANCE_RECORD_STRIDE: usize = 64;
const _: () = assert!(std::mem::size_of::<InstanceRecord>() == INSTANCE_RECORD_STRIDE);

/// Arena entry (64 bytes), read from a storage buffer by `prim` index:
///
///  offset  0  clip_rect         [f32; 4]  LTRB, pre-translate
///  offset 16  transform         [f32; 4]  a b c d
///  offset 32  transform_origin  [f32; 2]  e f
///  offset 40  translate         [f32; 2]
///  offset 48  flags             u32       PRIMITIVE_FLAG_*
///  offset 52  _pad              [u32; 3]
///
/// The clip slot is only meaningful with [`PRIMITIVE_FLAG_CLIP`] set. A clip
/// that lands at non-positive right/bottom after translate would read as the
/// fragment stage's "unclipped" sentinel, so the flag keeps that case apart.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PrimitiveRecord {
    pub clip_rect: [f32; 4],
    pub transform: [f32; 4],
    pub transform_origin: [f32; 2],
    pub translate: [f32; 2],
    pub flags: u32,
    pub _pad: [u32; 3],
}

/// The record carries a clip rect.
pub const PRIMITIVE_FLAG_CLIP: u32 = 1;

pub const PRIMITIVE_RECORD_STRIDE: usize = 64;
const _: () = assert!(std::mem::size_of::<PrimitiveRecord>() == PRIMITIVE_RECORD_STRIDE);

impl InstanceRecord {
    pub fn encode(p: &Primitive) -> Self {
        let (tag, flags, geometry, aux, param) = match p.kind {
            PrimitiveKind::Rect { bounds } => (KIND_RECT, 0, bounds.to_array(), [0.0; 4], 0.0),
            PrimitiveKind::Line { from, to, width } => {
                (KIND_LINE, 0, [from.x, from.y, to.x, to.y], [0.0; 4], width)
            }
            PrimitiveKind::Shadow { bounds, caster, radius, mode } => {
                let flags = match mode {
                    ShadowMode::Full => 0,
                    ShadowMode::ExcludeCaster => INSTANCE_FLAG_EXCLUDE_CASTER,
                };
                (KIND_SHADOW, flags, bounds.to_array(), caster.to_array(), radius)
            }
            PrimitiveKind::Image { bounds, uv } => {
                (KIND_IMAGE, 0, bounds.to_array(), uv.to_array(), 0.0)
            }
            PrimitiveKind::Glyph { bounds, uv, mode } => {
                let tag = match mode {
                    GlyphMode::Grayscale => KIND_GLYPH,
                    GlyphMode::Subpixel => KIND_SUBPIXEL_GLYPH,
                };
                (tag, 0, bounds.to_array(), uv.to_array(), 0.0)
            }
        };

        Self {
            geometry,
            color: p.color.to_array(),
            aux,
            kind_flags: tag | flags,
            prim: p.params.0,
            param,
            depth: p.depth,
        }
    }

    #[inline]
    pub fn kind(&self) -> u32 {
        self.kind_flags & KIND_MASK
    }
}

impl PrimitiveRecord {
    pub fn encode(params: &PrimitiveParams) -> Self {
        let [a, b, c, d, e, f] = params.transform.unwrap_or_default().coeffs;
        Self {
            clip_rect: params.clip.unwrap_or(Bounds::ZERO).to_array(),
            transform: [a, b, c, d],
            transform_origin: [e, f],
            translate: params.translate.to_array(),
            flags: if params.clip.is_some() { PRIMITIVE_FLAG_CLIP } else { 0 },
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Affine, Vec2};
    use crate::paint::Color;
    use crate::prim::PrimHandle;

    #[test]
    fn shadow_encodes_caster_radius_and_flag() {
        let p = Primitive::new(
            PrimitiveKind::Shadow {
                bounds: Bounds::new(0.0, 0.0, 40.0, 40.0),
                caster: Bounds::new(10.0, 10.0, 30.0, 30.0),
                radius: 3.0,
                mode: ShadowMode::ExcludeCaster,
            },
            Color::BLACK,
            2.0,
            PrimHandle(7),
        );
        let r = InstanceRecord::encode(&p);
        assert_eq!(r.kind(), KIND_SHADOW);
        assert_ne!(r.kind_flags & INSTANCE_FLAG_EXCLUDE_CASTER, 0);
        assert_eq!(r.aux, [10.0, 10.0, 30.0, 30.0]);
        assert_eq!(r.param, 3.0);
        assert_eq!(r.prim, 7);
        assert_eq!(r.depth, 2.0);
    }

    #[test]
    fn subpixel_glyph_has_own_tag() {
        let p = Primitive::new(
            PrimitiveKind::Glyph {
                bounds: Bounds::new(0.0, 0.0, 8.0, 12.0),
                uv: Bounds::new(0.0, 0.0, 0.5, 0.5),
                mode: GlyphMode::Subpixel,
            },
            Color::WHITE,
            0.0,
            PrimHandle(0),
        );
        assert_eq!(InstanceRecord::encode(&p).kind(), KIND_SUBPIXEL_GLYPH);
    }

    #[test]
    fn unclipped_params_encode_zero_clip() {
        let r = PrimitiveRecord::encode(&PrimitiveParams::translated(Vec2::new(3.0, 4.0)));
        assert_eq!(r.clip_rect, [0.0; 4]);
        assert_eq!(r.flags & PRIMITIVE_FLAG_CLIP, 0);
        assert_eq!(r.transform, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(r.translate, [3.0, 4.0]);
    }

    #[test]
    fn clipped_params_set_flag() {
        let clip = Bounds::new(-20.0, -20.0, -10.0, -10.0);
        let r = PrimitiveRecord::encode(&PrimitiveParams::default().with_clip(clip));
        assert_eq!(r.clip_rect, clip.to_array());
        assert_eq!(r.flags & PRIMITIVE_FLAG_CLIP, PRIMITIVE_FLAG_CLIP);
    }

    #[test]
    fn transform_splits_linear_and_origin() {
        let t = Affine::new([2.0, 0.5, -0.5, 2.0, 9.0, 8.0]);
        let r = PrimitiveRecord::encode(&PrimitiveParams::default().with_transform(t));
        assert_eq!(r.transform, [2.0, 0.5, -0.5, 2.0]);
        assert_eq!(r.transform_origin, [9.0, 8.0]);
    }
}
