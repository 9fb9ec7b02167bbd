//! Color model shared by the recorder, the CPU shading reference and the GPU
//! records.
//!
//! Colors are stored straight (non-premultiplied) and premultiplied only when
//! a fragment is produced. Geometry types live in `coords`.

pub mod color;

pub use color::{Color, LUMA_WEIGHTS};
