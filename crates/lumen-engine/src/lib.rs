//! Lumen engine crate.
//!
//! Instanced 2D primitive rendering: rects, stroked lines, analytic box
//! shadows, images and gamma-corrected glyphs, drawn from compact per-instance
//! records in one or few draw calls.
//!
//! Layers, bottom-up:
//! - `coords`, `paint`: geometry and color vocabulary
//! - `prim`: primitive model, shared parameter arena, GPU record encodings
//! - `shade`: CPU reference of the vertex and fragment stages
//! - `scene`: host-side recorder producing batches
//! - `render`, `device`: wgpu pipelines and headless bootstrap

pub mod coords;
pub mod device;
pub mod logging;
pub mod paint;
pub mod prim;
pub mod render;
pub mod scene;
pub mod shade;
