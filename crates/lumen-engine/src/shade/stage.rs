use crate::coords::{Bounds, Vec2};
use crate::paint::Color;
use crate::prim::{
    GlyphMode, PrimError, Primitive, PrimitiveBatch, PrimitiveKind, PrimitiveParams, ShadowMode,
};

use super::{
    clip_discards, clip_is_active, expand, project_position, screen_clip, shadow_coverage,
    subpixel_coverage, to_screen, Corner, DrawContext, TextureSource, CLIP_REJECT_ALL,
};

/// Per-pixel shading path, fixed per primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shading {
    Flat,
    /// Caster and radius are already in physical pixels.
    Shadow { caster: Bounds, radius: f32, mode: ShadowMode },
    Image,
    Glyph { mode: GlyphMode },
}

/// Values the fragment stage reads.
///
/// `position`, `uv` and `shadow_point` interpolate across the quad; the rest
/// are constant per primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Varyings {
    /// Physical pixels, top-left origin (the fragment position).
    pub position: Vec2,
    pub color: Color,
    pub uv: Vec2,
    /// Physical pixels; [`Bounds::ZERO`] when unclipped.
    pub clip: Bounds,
    /// Untransformed position in physical pixels, for shadow math.
    pub shadow_point: Vec2,
    pub shading: Shading,
}

impl Varyings {
    /// Bilinear interpolation across a quad's corners in strip order, `s` along
    /// X and `t` along Y, both in `[0, 1]`.
    pub fn interpolate(corners: &[VertexOutput; 4], s: f32, t: f32) -> Varyings {
        let lerp = |a: Vec2, b: Vec2, k: f32| a + (b - a) * k;
        let bilerp = |f: fn(&Varyings) -> Vec2| {
            let top = lerp(f(&corners[0].varyings), f(&corners[1].varyings), s);
            let bottom = lerp(f(&corners[2].varyings), f(&corners[3].varyings), s);
            lerp(top, bottom, t)
        };

        Varyings {
            position: bilerp(|v| v.position),
            uv: bilerp(|v| v.uv),
            shadow_point: bilerp(|v| v.shadow_point),
            ..corners[0].varyings
        }
    }
}

/// Vertex stage result for one corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    /// Homogeneous clip-space position.
    pub clip_position: [f32; 4],
    pub varyings: Varyings,
}

/// Fragment stage result.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Fragment {
    /// No color, no depth write.
    Discard,
    /// Premultiplied color for the normal pass.
    Color([f32; 4]),
    /// Dual-source output: `color` is the flat foreground, `mask` the
    /// per-channel coverage used as blend factor.
    DualSource { color: [f32; 4], mask: [f32; 4] },
}

impl Fragment {
    /// The same output expressed for the dual-source pass: straight color
    /// with a uniform coverage mask, which `Src1, OneMinusSrc1` blends exactly
    /// like the premultiplied pass.
    pub fn to_dual_source(self) -> Fragment {
        match self {
            Fragment::Color([r, g, b, a]) if a > 0.0 => Fragment::DualSource {
                color: [r / a, g / a, b / a, 1.0],
                mask: [a; 4],
            },
            Fragment::Color(_) => Fragment::Discard,
            other => other,
        }
    }

    /// Composites onto premultiplied `dst` with the blend state of the pass
    /// that produces this variant.
    pub fn blend_over(self, dst: [f32; 4]) -> [f32; 4] {
        match self {
            Fragment::Discard => dst,
            Fragment::Color(src) => std::array::from_fn(|i| src[i] + dst[i] * (1.0 - src[3])),
            Fragment::DualSource { color, mask } => {
                std::array::from_fn(|i| color[i] * mask[i] + dst[i] * (1.0 - mask[i]))
            }
        }
    }
}

/// Vertex stage: expands, projects and forwards shading inputs for one corner.
pub fn vertex(
    ctx: &DrawContext,
    prim: &Primitive,
    params: &PrimitiveParams,
    corner: Corner,
) -> VertexOutput {
    let scale = ctx.uniforms().scale;
    let expanded = expand(prim, params, corner);

    let clip = match params.clip {
        None => Bounds::ZERO,
        Some(c) => {
            let c = screen_clip(c, params.translate, scale);
            if clip_is_active(c) { c } else { CLIP_REJECT_ALL }
        }
    };

    let shading = match prim.kind {
        PrimitiveKind::Rect { .. } | PrimitiveKind::Line { .. } => Shading::Flat,
        PrimitiveKind::Shadow { caster, radius, mode, .. } => Shading::Shadow {
            caster: screen_clip(caster, params.translate, scale),
            radius: radius * scale,
            mode,
        },
        PrimitiveKind::Image { .. } => Shading::Image,
        PrimitiveKind::Glyph { mode, .. } => Shading::Glyph { mode },
    };

    VertexOutput {
        clip_position: project_position(ctx, expanded.world, prim.depth),
        varyings: Varyings {
            position: to_screen(expanded.world, scale),
            color: prim.color,
            uv: expanded.uv,
            clip,
            shadow_point: to_screen(expanded.untransformed, scale),
            shading,
        },
    }
}

/// Runs the vertex stage over all four corners of `batch.primitives[index]`.
pub fn vertices(
    ctx: &DrawContext,
    batch: &PrimitiveBatch,
    index: usize,
) -> Result<[VertexOutput; 4], PrimError> {
    let prim = batch.primitives.get(index).ok_or(PrimError::PrimitiveOutOfRange {
        index,
        len: batch.primitives.len(),
    })?;
    let params = batch.arena.get(prim.params)?;
    Ok(Corner::ALL.map(|corner| vertex(ctx, prim, params, corner)))
}

/// Fragment stage. Clip runs first so discarded pixels skip the shadow
/// integral and the texture fetch.
pub fn fragment(ctx: &DrawContext, v: &Varyings, texture: &dyn TextureSource) -> Fragment {
    if clip_discards(v.clip, v.position) {
        return Fragment::Discard;
    }

    let color = v.color;
    match v.shading {
        Shading::Flat => Fragment::Color(color.premultiplied()),
        Shading::Shadow { caster, radius, mode } => {
            match shadow_coverage(caster, v.shadow_point, radius, mode) {
                None => Fragment::Discard,
                Some(coverage) => {
                    Fragment::Color(color.with_alpha(color.a * coverage).premultiplied())
                }
            }
        }
        Shading::Image => {
            let texel = texture.sample(v.uv);
            let alpha = color.a * texel[3];
            if alpha <= 0.0 {
                return Fragment::Discard;
            }
            let tinted =
                Color::new(color.r * texel[0], color.g * texel[1], color.b * texel[2], alpha);
            Fragment::Color(tinted.premultiplied())
        }
        Shading::Glyph { mode: GlyphMode::Subpixel } if ctx.config().subpixel_text => {
            let texel = texture.sample(v.uv);
            let coverage =
                subpixel_coverage(color, [texel[0], texel[1], texel[2]]).map(|c| c * color.a);
            let max = coverage[0].max(coverage[1]).max(coverage[2]);
            if max <= 0.0 {
                return Fragment::Discard;
            }
            Fragment::DualSource {
                color: [color.r, color.g, color.b, 1.0],
                mask: [coverage[0], coverage[1], coverage[2], max],
            }
        }
        Shading::Glyph { .. } => {
            let alpha = color.a * texture.sample(v.uv)[0];
            if alpha <= 0.0 {
                return Fragment::Discard;
            }
            Fragment::Color(color.with_alpha(alpha).premultiplied())
        }
    }
}
