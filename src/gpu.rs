use bytemuck::Zeroable;
use log::{debug, info, warn};
use winit::window::Window;

use crate::{
    colour::Gradient,
    command_encoder::{self, CommandEncoderExt},
    config::Variant,
    error::Error,
    frame::Renderer,
    render_target::RenderTarget,
    screen, uniforms, var,
};

const BASIC_SHADER: &str = concat!(include_str!("common.wgsl"), include_str!("basic.wgsl"));
const JULIA_SHADER: &str = concat!(include_str!("common.wgsl"), include_str!("julia.wgsl"));

/// [`Renderer`] backed by a `wgpu` surface on the window.
pub struct GpuRenderer {
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_configuration: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    frame_var: var::Var<uniforms::Frame>,
    gradient_var: var::Var<Gradient>,
    render_target: Option<RenderTarget>,
    bind_group: wgpu::BindGroup,
}

impl GpuRenderer {
    /// `window` must outlive the renderer.
    pub fn new(window: &Window, variant: Variant) -> Result<Self, Error> {
        let size = screen::Size::from(window.inner_size());

        let instance = wgpu::Instance::new(wgpu::Backends::all());
        let surface = unsafe { instance.create_surface(window) };

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(Error::NoAdapter)?;
        info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("device"),
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let format = *surface
            .get_supported_formats(&adapter)
            .first()
            .ok_or(Error::IncompatibleSurface)?;
        info!("surface format {:?}", format);

        let surface_configuration = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &surface_configuration);

        let (label, source) = match variant {
            Variant::Basic => ("basic-shader", BASIC_SHADER),
            Variant::Julia => ("julia-shader", JULIA_SHADER),
        };
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fractal-bind-group-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::NonFiltering),
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractal-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractal-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex_main",
                buffers: &[],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_configuration.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor::default());

        let frame_var = var::Builder::new(uniforms::Frame::zeroed())
            .with_label("frame-uniforms")
            .create(&device);
        let gradient_var = var::Builder::new(Gradient::zeroed())
            .with_label("gradient-uniforms")
            .create(&device);

        let render_target = RenderTarget::new(
            &device,
            screen::Size::new(surface_configuration.width, surface_configuration.height),
        );
        let bind_group = create_bind_group(
            &device,
            &bind_group_layout,
            &render_target,
            &sampler,
            &frame_var,
            &gradient_var,
        );

        Ok(Self {
            surface,
            device,
            queue,
            surface_configuration,
            render_pipeline,
            bind_group_layout,
            sampler,
            frame_var,
            gradient_var,
            render_target: Some(render_target),
            bind_group,
        })
    }

    fn configure_surface(&self) {
        self.surface
            .configure(&self.device, &self.surface_configuration);
    }
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_target: &RenderTarget,
    sampler: &wgpu::Sampler,
    frame_var: &var::Var<uniforms::Frame>,
    gradient_var: &var::Var<Gradient>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("fractal-bind-group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(render_target.view()),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            frame_var.bind_group_entry(2),
            gradient_var.bind_group_entry(3),
        ],
    })
}

impl Renderer for GpuRenderer {
    fn resize(&mut self, size: screen::Size) {
        debug!("resizing to {:?}", size);

        self.surface_configuration.width = size.width;
        self.surface_configuration.height = size.height;
        self.configure_surface();

        if let Some(render_target) = self.render_target.take() {
            render_target.destroy();
        }
        let render_target = RenderTarget::new(&self.device, size);

        self.bind_group = create_bind_group(
            &self.device,
            &self.bind_group_layout,
            &render_target,
            &self.sampler,
            &self.frame_var,
            &self.gradient_var,
        );
        self.render_target = Some(render_target);
    }

    fn upload_gradient(&mut self, gradient: &Gradient) {
        self.gradient_var.write(&self.queue, gradient);
    }

    fn upload_frame(&mut self, frame: &uniforms::Frame) {
        self.frame_var.write(&self.queue, frame);
    }

    fn draw(&mut self) -> Result<(), Error> {
        let render_target = match &self.render_target {
            Some(render_target) => render_target,
            None => return Ok(()),
        };

        let surface_texture = match self.surface.get_current_texture() {
            Ok(surface_texture) => surface_texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.configure_surface();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("timed out acquiring a surface texture, skipping frame");
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(Error::OutOfMemory),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let command_buffer = command_encoder::encode(&self.device, "frame", |command_encoder| {
            command_encoder.with_debug_group("clear-pass", |command_encoder| {
                command_encoder.with_render_pass(
                    &wgpu::RenderPassDescriptor {
                        label: Some("clear-pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: render_target.view(),
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: true,
                            },
                        })],
                        depth_stencil_attachment: None,
                    },
                    |_| {},
                )
            });

            command_encoder.with_debug_group("fractal-pass", |command_encoder| {
                command_encoder.with_render_pass(
                    &wgpu::RenderPassDescriptor {
                        label: Some("fractal-pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &surface_texture_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: true,
                            },
                        })],
                        depth_stencil_attachment: None,
                    },
                    |render_pass| {
                        render_pass.set_pipeline(&self.render_pipeline);
                        render_pass.set_bind_group(0, &self.bind_group, &[]);
                        render_pass.draw(0..4, 0..1);
                    },
                )
            });
        });

        self.queue.submit([command_buffer]);
        surface_texture.present();

        Ok(())
    }
}

impl Drop for GpuRenderer {
    fn drop(&mut self) {
        debug!("releasing shader and render target");
        if let Some(render_target) = self.render_target.take() {
            render_target.destroy();
        }
    }
}
