use crate::prim::{EncodedBatch, InstanceRecord, PrimitiveRecord};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    depth_stencil_state, dual_source_blend, globals_min_binding_size, instance_layout,
    premul_alpha_blend, record_min_binding_size, Globals,
};

const PRIMITIVES_WGSL: &str = include_str!("shaders/primitives.wgsl");
const SUBPIXEL_WGSL: &str = concat!(
    "enable dual_source_blending;\n",
    include_str!("shaders/primitives.wgsl"),
    include_str!("shaders/subpixel.wgsl"),
);

/// Which fragment entry point and blend state a pass uses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum PassMode {
    Premultiplied,
    DualSource,
}

impl PassMode {
    fn label(self) -> &'static str {
        match self {
            PassMode::Premultiplied => "lumen primitives",
            PassMode::DualSource => "lumen subpixel text",
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct PipelineKey {
    color: wgpu::TextureFormat,
    depth: Option<wgpu::TextureFormat>,
}

/// One instanced triangle-strip draw over an [`EncodedBatch`].
///
/// Owns the pipeline, the globals/instance/arena buffers, a sampler and a
/// 1×1 white texture bound when the caller passes none. Everything is created
/// lazily and rebuilt when the target formats change.
pub(super) struct PrimitivePass {
    mode: PassMode,

    pipeline_key: Option<PipelineKey>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    globals_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,
    white_view: Option<wgpu::TextureView>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,

    record_sbo: Option<wgpu::Buffer>,
    record_capacity: usize,
}

impl PrimitivePass {
    pub(super) fn new(mode: PassMode) -> Self {
        Self {
            mode,
            pipeline_key: None,
            pipeline: None,
            bind_group_layout: None,
            globals_ubo: None,
            sampler: None,
            white_view: None,
            instance_vbo: None,
            instance_capacity: 0,
            record_sbo: None,
            record_capacity: 0,
        }
    }

    pub(super) fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        batch: &EncodedBatch,
        texture: Option<&wgpu::TextureView>,
    ) {
        if batch.is_empty() {
            return;
        }
        if ctx.depth_format.is_some() != target.depth_view.is_some() {
            log::warn!(
                "{}: depth format and depth attachment disagree; skipping draw",
                self.mode.label()
            );
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_resources(ctx);
        self.ensure_instance_capacity(ctx, batch.instances.len());
        self.ensure_record_capacity(ctx, batch.records.len());

        let (Some(globals_ubo), Some(instance_vbo), Some(record_sbo)) =
            (self.globals_ubo.as_ref(), self.instance_vbo.as_ref(), self.record_sbo.as_ref())
        else {
            return;
        };

        let globals = Globals::from_draw_context(ctx.draw);
        ctx.queue.write_buffer(globals_ubo, 0, bytemuck::bytes_of(&globals));
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&batch.instances));
        ctx.queue.write_buffer(record_sbo, 0, bytemuck::cast_slice(&batch.records));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };
        let Some(texture) = texture.or(self.white_view.as_ref()) else { return };

        // The texture can change every call, so the bind group is not cached.
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lumen primitive bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: globals_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: record_sbo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(texture),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        let depth_stencil_attachment =
            target.depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(self.mode.label()),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.set_vertex_buffer(0, instance_vbo.slice(..));
        rpass.draw(0..4, 0..batch.instances.len() as u32);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        let key = PipelineKey { color: ctx.surface_format, depth: ctx.depth_format };
        if self.pipeline_key == Some(key) && self.pipeline.is_some() {
            return;
        }
        log::debug!("{}: building pipeline for {:?}", self.mode.label(), key);

        let (source, fs_entry, blend) = match self.mode {
            PassMode::Premultiplied => (PRIMITIVES_WGSL, "fs_main", premul_alpha_blend()),
            PassMode::DualSource => (SUBPIXEL_WGSL, "fs_subpixel", dual_source_blend()),
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(self.mode.label()),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lumen primitive bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(globals_min_binding_size()),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: Some(record_min_binding_size()),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lumen primitive pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(self.mode.label()),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[instance_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs_entry),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: depth_stencil_state(ctx.depth_format),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_key = Some(key);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
    }

    fn ensure_static_resources(&mut self, ctx: &RenderCtx<'_>) {
        if self.globals_ubo.is_none() {
            self.globals_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("lumen globals ubo"),
                size: std::mem::size_of::<Globals>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }

        if self.sampler.is_none() {
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("lumen primitive sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Linear,
                min_filter: wgpu::FilterMode::Linear,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }

        if self.white_view.is_none() {
            let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("lumen white texel"),
                size: wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            });
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &[255u8; 4],
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4),
                    rows_per_image: Some(1),
                },
                wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
            );
            self.white_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        }
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        log::debug!("{}: instance buffer grows to {new_cap}", self.mode.label());
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen instance vbo"),
            size: (new_cap * std::mem::size_of::<InstanceRecord>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }

    fn ensure_record_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.record_capacity && self.record_sbo.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(64);
        log::debug!("{}: primitive arena buffer grows to {new_cap}", self.mode.label());
        self.record_sbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lumen primitive records"),
            size: (new_cap * std::mem::size_of::<PrimitiveRecord>()) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.record_capacity = new_cap;
    }
}
