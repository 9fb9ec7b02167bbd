//! CPU reference of the shading stages.
//!
//! Every function here has a WGSL twin in `render/shaders/primitives.wgsl` and
//! uses the same arithmetic, in the same order. The GPU additionally folds
//! device depth into wgpu's `[0, 1]` range ([`unit_range_depth`]). Hosts use this module for
//! hit-testing and tests; the GPU path never calls it.
//!
//! Stage order per primitive:
//! 1. `expand`: ordinal → local corner, then transform and translate
//! 2. `project`: scale, NDC or view-projection, device depth
//! 3. `clip`: per-fragment discard against the clip rect
//! 4. `shadow` / `text`: analytic coverage and gamma correction

mod clip;
mod context;
mod error;
mod expand;
mod project;
mod shadow;
mod stage;
mod text;
mod texture;

pub use clip::{clip_discards, clip_is_active, CLIP_REJECT_ALL};
pub use context::{DepthConvention, DrawContext, FrameUniforms, PipelineConfig, ProjectionMode};
pub use error::ShadeError;
pub use expand::{expand, expand_line, expand_rect, expand_stroke_vertex, Corner, ExpandedVertex};
pub use project::{
    device_depth, ndc_from_screen, project_position, screen_clip, to_screen, unit_range_depth,
};
pub use shadow::{box_shadow, erf_approx, shadow_coverage};
pub use stage::{fragment, vertex, vertices, Fragment, Shading, Varyings, VertexOutput};
pub use text::{gamma_correct_alpha, subpixel_coverage, GammaParams, GAMMA_DENOMINATOR_EPSILON};
pub use texture::{AlphaMask, RgbaImage, SolidTexture, TextureSource};
