use anyhow::{Context, Result};

use super::{GpuInit, OffscreenTarget};

/// Owns wgpu core objects for offscreen rendering.
pub struct HeadlessGpu {
    /// Kept alive for the adapter and device.
    _instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl HeadlessGpu {
    /// Acquires an adapter and device. Adapter/device acquisition is
    /// asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: None,
                force_fallback_adapter: init.force_fallback_adapter,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let available = adapter.features();
        anyhow::ensure!(
            available.contains(init.required_features),
            "adapter lacks required features {:?}",
            init.required_features.difference(available)
        );
        let features = init.negotiate_features(available);

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);
        if !features.contains(wgpu::Features::DUAL_SOURCE_BLENDING) {
            log::debug!("dual-source blending not enabled on this device");
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("lumen-engine device"),
                required_features: features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self { _instance: instance, adapter, device, queue })
    }

    /// [`HeadlessGpu::new`] driven to completion on the current thread.
    pub fn new_blocking(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn supports_dual_source(&self) -> bool {
        self.device.features().contains(wgpu::Features::DUAL_SOURCE_BLENDING)
    }

    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("lumen frame encoder"),
        })
    }

    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Copies `target`'s color texture back to the CPU, tightly packed rows.
    ///
    /// Blocks until the copy finishes. Only 4-byte-per-texel formats are
    /// supported.
    pub fn read_pixels(&self, target: &OffscreenTarget) -> Result<Vec<u8>> {
        let texel = target.color_format.block_copy_size(None);
        anyhow::ensure!(
            texel == Some(4),
            "readback needs a 4-byte color format, got {:?}",
            target.color_format
        );

        let (width, height) = (target.width.max(1), target.height.max(1));
        let row = width * 4;
        let padded_row = row.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen readback"),
            size: u64::from(padded_row) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.create_encoder();
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: target.color_texture(),
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );
        self.submit(encoder);

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::Wait { submission_index: None, timeout: None })
            .context("device poll failed during readback")?;
        rx.recv()
            .context("readback map callback dropped")?
            .context("failed to map readback buffer")?;

        let mut pixels = Vec::with_capacity(row as usize * height as usize);
        {
            let data = slice.get_mapped_range();
            for chunk in data.chunks(padded_row as usize) {
                pixels.extend_from_slice(&chunk[..row as usize]);
            }
        }
        buffer.unmap();
        Ok(pixels)
    }
}
