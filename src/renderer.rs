// renderer.rs — 核心渲染器（内翻球体 + egui 界面）

use crate::camera;
use crate::mesh::{self, Vertex};
use crate::panorama::Orientation;
use anyhow::Context as _;
use image::RgbaImage;
use wgpu::util::DeviceExt;
use winit::window::Window;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

/// GPU resources that belong to one mounted panorama.
struct SphereScene {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl SphereScene {
    fn release(self) {
        self.texture.destroy();
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

pub struct Renderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,

    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    camera_buffer: wgpu::Buffer,

    scene: Option<SphereScene>,

    // UI
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Renderer {
    pub async fn new(window: std::sync::Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Safety: the window is kept alive by the Arc held in main for as long as the surface.
        let surface = unsafe { instance.create_surface(window.as_ref()) }
            .context("failed to create rendering surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    label: None,
                },
                None,
            )
            .await
            .context("failed to open GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo, // 每个显示帧渲染一次
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat, // 全景图通常需要水平循环
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let camera_uniform = CameraUniform {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
        };
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("panorama_bind_group_layout"),
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("shader_sphere.wgsl"));
        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None, // 相机在球内，每条视线只与球面相交一次
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let egui_ctx = egui::Context::default();
        crate::fonts::install_ui_fonts(&egui_ctx);

        let mut egui_state = egui_winit::State::new(window.as_ref());
        // 高 DPI 显示器
        egui_state.set_pixels_per_point(window.scale_factor() as f32);

        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            bind_group_layout,
            sampler,
            camera_buffer,
            scene: None,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Builds the sphere and an untextured (black) material for a new mount.
    /// Any previous scene is released first.
    pub fn mount_scene(&mut self) {
        self.unmount_scene();

        let sphere = mesh::build_inverted_sphere(
            mesh::SPHERE_RADIUS,
            mesh::SPHERE_WIDTH_SEGMENTS,
            mesh::SPHERE_HEIGHT_SEGMENTS,
        );
        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertices"),
            contents: bytemuck::cast_slice(&sphere.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Indices"),
            contents: bytemuck::cast_slice(&sphere.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let black = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 255]));
        let (texture, bind_group) = self.upload_texture(&black, "untextured_sphere");

        self.scene = Some(SphereScene {
            vertex_buffer,
            index_buffer,
            index_count: sphere.indices.len() as u32,
            texture,
            bind_group,
        });
    }

    pub fn unmount_scene(&mut self) {
        if let Some(scene) = self.scene.take() {
            scene.release();
        }
    }

    pub fn update_camera(&mut self, orientation: Orientation, fov: f32) {
        let uniform = CameraUniform {
            view_proj: camera::view_projection(orientation, fov, self.aspect()).to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Replaces the current scene's material with `img`.
    pub fn bind_panorama(&mut self, img: RgbaImage) {
        if self.scene.is_none() {
            log::warn!("panorama arrived with no mounted scene; ignoring");
            return;
        }

        let img = fit_to_limit(img, self.device.limits().max_texture_dimension_2d);
        let (texture, bind_group) = self.upload_texture(&img, "panorama_texture");

        if let Some(scene) = self.scene.as_mut() {
            let old = std::mem::replace(&mut scene.texture, texture);
            old.destroy();
            scene.bind_group = bind_group;
        }
    }

    fn upload_texture(&self, img: &RgbaImage, label: &str) -> (wgpu::Texture, wgpu::BindGroup) {
        let (width, height) = img.dimensions();
        let texture_size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            size: texture_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            label: Some(label),
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            img,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            texture_size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
            label: Some("panorama_bind_group"),
        });

        (texture, bind_group)
    }

    pub fn render_with_ui(
        &mut self,
        window: &Window,
        run_ui: impl FnOnce(&egui::Context),
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        // 1. 场景
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sphere Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });

            if let Some(scene) = &self.scene {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &scene.bind_group, &[]);
                render_pass.set_vertex_buffer(0, scene.vertex_buffer.slice(..));
                render_pass.set_index_buffer(scene.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..scene.index_count, 0, 0..1);
            }
        }

        // 2. UI
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, run_ui);

        self.egui_state
            .handle_platform_output(window, &self.egui_ctx, full_output.platform_output);
        let clipped_primitives = self.egui_ctx.tessellate(full_output.shapes);

        let screen_descriptor = egui_wgpu::renderer::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };

        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &clipped_primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: true,
                    },
                })],
                depth_stencil_attachment: None,
            });
            self.egui_renderer
                .render(&mut render_pass, &clipped_primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.unmount_scene();
    }
}

/// Downscales `img` so neither side exceeds `max_dim`, keeping the aspect ratio.
fn fit_to_limit(img: RgbaImage, max_dim: u32) -> RgbaImage {
    let (src_w, src_h) = img.dimensions();
    if src_w <= max_dim && src_h <= max_dim {
        return img;
    }

    let scale = max_dim as f64 / src_w.max(src_h) as f64;
    let new_w = ((src_w as f64 * scale) as u32).clamp(1, max_dim);
    let new_h = ((src_h as f64 * scale) as u32).clamp(1, max_dim);
    log::warn!(
        "panorama {}x{} exceeds the GPU limit of {}; scaling to {}x{}",
        src_w,
        src_h,
        max_dim,
        new_w,
        new_h
    );
    image::imageops::resize(&img, new_w, new_h, image::imageops::FilterType::Lanczos3)
}
