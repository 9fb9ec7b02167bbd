/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,

    /// Use a software adapter (CI machines without a GPU).
    pub force_fallback_adapter: bool,

    /// Features the device must have; bootstrap fails without them.
    pub required_features: wgpu::Features,

    /// Features requested only when the adapter offers them.
    ///
    /// Defaults to `DUAL_SOURCE_BLENDING`, which subpixel text needs.
    pub optional_features: wgpu::Features,

    pub required_limits: wgpu::Limits,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            required_features: wgpu::Features::empty(),
            optional_features: wgpu::Features::DUAL_SOURCE_BLENDING,
            required_limits: wgpu::Limits::default(),
        }
    }
}

impl GpuInit {
    /// Features to request from an adapter that offers `available`.
    pub fn negotiate_features(&self, available: wgpu::Features) -> wgpu::Features {
        self.required_features | (self.optional_features & available)
    }
}
