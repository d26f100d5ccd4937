use arch_core::constants::{
    GUM_RADIAL_SEGMENTS, GUM_TUBULAR_SEGMENTS, TOOTH_CAP_SEGMENTS, TOOTH_LENGTH,
    TOOTH_RADIAL_SEGMENTS, TOOTH_RADIUS,
};
use arch_core::mesh::{self, MeshVertex};
use arch_core::scene::EnvironmentPreset;
use arch_core::{Camera, DrawBatches, InstanceRaw, Light, MeshKind, Scene};
use web_sys as web;

mod helpers;
use helpers::GpuMesh;

// Hemispheric fill standing in for the studio environment map
const STUDIO_FILL: f32 = 0.35;

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    spot: [f32; 4],
    spot_cone: [f32; 4],
    point: [f32; 4],
    directional: [f32; 4],
}

impl SceneUniforms {
    /// Pack the fixed light rig; camera fields are filled per frame.
    fn from_scene(scene: &Scene) -> Self {
        let mut u = SceneUniforms::default();
        let fill = match scene.environment {
            EnvironmentPreset::Studio => STUDIO_FILL,
        };
        u.ambient[3] = fill;
        for light in &scene.lights {
            match *light {
                Light::Ambient { intensity } => {
                    u.ambient = [intensity, intensity, intensity, fill];
                }
                Light::Spot {
                    position,
                    angle,
                    penumbra,
                    intensity,
                    ..
                } => {
                    u.spot = [position.x, position.y, position.z, intensity];
                    let inner = angle * (1.0 - penumbra.clamp(0.0, 1.0));
                    u.spot_cone = [angle.cos(), inner.cos(), 0.0, 0.0];
                }
                Light::Point {
                    position,
                    intensity,
                } => {
                    u.point = [position.x, position.y, position.z, intensity];
                }
                Light::Directional {
                    position,
                    intensity,
                } => {
                    let dir = position.normalize_or_zero();
                    u.directional = [dir.x, dir.y, dir.z, intensity];
                }
            }
        }
        u
    }
}

struct InstanceSlot {
    kind: MeshKind,
    buffer: wgpu::Buffer,
    capacity: usize,
    count: u32,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    tooth_mesh: GpuMesh,
    gum_mesh: GpuMesh,
    shadow_mesh: GpuMesh,
    instances: Vec<InstanceSlot>,
    uniforms: SceneUniforms,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, scene: &Scene) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let fallback = caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(fallback);
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(arch_core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline = create_scene_pipeline(&device, &pl, &shader, format);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (depth_tex, depth_view) =
            helpers::create_depth_texture(&device, "depth_tex", width, height);

        let gum = &scene.upper.gum_base;
        let tooth_mesh = helpers::upload_mesh(
            &device,
            "tooth",
            &mesh::capsule(
                TOOTH_RADIUS,
                TOOTH_LENGTH,
                TOOTH_CAP_SEGMENTS,
                TOOTH_RADIAL_SEGMENTS,
            ),
        );
        let gum_mesh = helpers::upload_mesh(
            &device,
            "gum",
            &mesh::torus(
                gum.radius,
                gum.tube,
                GUM_RADIAL_SEGMENTS,
                GUM_TUBULAR_SEGMENTS,
                gum.arc,
            ),
        );
        let shadow_mesh = helpers::upload_mesh(&device, "shadow", &mesh::ground_plane());

        // Draw order: the translucent shadow first, then the opaque arches over it
        let capacities = [
            (MeshKind::Shadow, 1),
            (MeshKind::Gum, scene.arches().len()),
            (MeshKind::Tooth, scene.tooth_count()),
        ];
        let instances = capacities
            .into_iter()
            .map(|(kind, capacity)| InstanceSlot {
                kind,
                buffer: helpers::create_instance_buffer(
                    &device,
                    &format!("{kind:?}_instances").to_lowercase(),
                    capacity,
                ),
                capacity,
                count: 0,
            })
            .collect();

        log::info!(
            "[gpu] surface {}x{} {:?}, {} tooth instances",
            width,
            height,
            format,
            scene.tooth_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            depth_tex,
            depth_view,
            tooth_mesh,
            gum_mesh,
            shadow_mesh,
            instances,
            uniforms: SceneUniforms::from_scene(scene),
            width,
            height,
            clear_color: helpers::linear_clear_color(scene.background),
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Re-apply the current surface configuration after a lost or outdated frame.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) =
                helpers::create_depth_texture(&self.device, "depth_tex", width, height);
            self.depth_tex.destroy();
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    fn upload_instances(&mut self, batches: &DrawBatches) {
        for slot in &mut self.instances {
            let data: &[InstanceRaw] = batches.get(slot.kind);
            let n = data.len().min(slot.capacity);
            if n < data.len() {
                log::warn!("[gpu] dropping {} {:?} instances", data.len() - n, slot.kind);
            }
            if n > 0 {
                self.queue
                    .write_buffer(&slot.buffer, 0, bytemuck::cast_slice(&data[..n]));
            }
            slot.count = n as u32;
        }
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        batches: &DrawBatches,
    ) -> Result<(), wgpu::SurfaceError> {
        self.uniforms.view_proj = camera.view_proj().to_cols_array_2d();
        self.uniforms.camera_pos = camera.eye.extend(1.0).to_array();
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
        self.upload_instances(batches);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            for slot in &self.instances {
                if slot.count == 0 {
                    continue;
                }
                let mesh = match slot.kind {
                    MeshKind::Tooth => &self.tooth_mesh,
                    MeshKind::Gum => &self.gum_mesh,
                    MeshKind::Shadow => &self.shadow_mesh,
                };
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, slot.buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..mesh.index_count, 0, 0..slot.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4
];

fn create_scene_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("scene_pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<InstanceRaw>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRS,
                },
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            // the half torus is open-ended; draw both faces
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: helpers::DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    })
}
