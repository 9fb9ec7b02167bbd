//! Headless GPU bootstrap.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - negotiating optional features (dual-source blending for subpixel text)
//! - offscreen color/depth targets for rendering without a window

mod gpu;
mod init;
mod target;

pub use gpu::HeadlessGpu;
pub use init::GpuInit;
pub use target::OffscreenTarget;
