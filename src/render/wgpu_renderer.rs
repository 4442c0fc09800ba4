use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{debug, warn};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::render::color::{color_to_wgpu, ortho_projection};
use crate::render::shader;
use crate::traits::render::{Color, RenderBackend, Vertex};
use crate::util::GameError;

/// GPU-backed 2D renderer using wgpu.
///
/// Geometry submitted during a frame is batched and drawn in a single pass
/// on `end_frame`, after clearing to the last `clear` colour.
pub struct WgpuRenderer {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    clear_color: Color,
    current_frame: Option<wgpu::SurfaceTexture>,

    screen_width: u32,
    screen_height: u32,
}

impl WgpuRenderer {
    /// Create a new WgpuRenderer for the given window.
    pub async fn new(window: Arc<Window>) -> Result<Self, GameError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| GameError::Initialization(format!("failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| {
                GameError::Initialization("failed to find a suitable GPU adapter".to_string())
            })?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("quadrant_device"),
                    ..Default::default()
                },
                None,
            )
            .await
            .map_err(|e| GameError::Initialization(format!("failed to create device: {e}")))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| GameError::Initialization("surface has no formats".to_string()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode,
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);
        debug!(?format, width = size.width, height = size.height, "surface configured");

        let uniform_bind_group_layout = shader::create_uniform_bind_group_layout(&device);
        let pipeline =
            shader::create_geometry_pipeline(&device, format, &uniform_bind_group_layout);

        let projection = ortho_projection(size.width.max(1) as f32, size.height.max(1) as f32);
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::cast_slice(&projection),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            window,
            device,
            queue,
            surface,
            surface_config,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertices: Vec::new(),
            indices: Vec::new(),
            clear_color: Color::BLACK,
            current_frame: None,
            screen_width: size.width,
            screen_height: size.height,
        })
    }

    /// Resize the renderer surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.screen_width = width;
        self.screen_height = height;
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);

        let projection = ortho_projection(width as f32, height as f32);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&projection));
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Clear and draw everything batched this frame in one pass.
    fn flush(&mut self, view: &wgpu::TextureView) {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let buffers = (!self.indices.is_empty()).then(|| {
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("vertex_buffer"),
                    contents: bytemuck::cast_slice(&self.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("index_buffer"),
                    contents: bytemuck::cast_slice(&self.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });
            (vertex_buffer, index_buffer)
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color_to_wgpu(self.clear_color)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if let Some((vertex_buffer, index_buffer)) = &buffers {
                let index_count = u32::try_from(self.indices.len()).unwrap_or(u32::MAX);
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..index_count, 0, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.vertices.clear();
        self.indices.clear();
    }
}

impl RenderBackend for WgpuRenderer {
    fn begin_frame(&mut self) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| anyhow!("failed to get surface texture: {e}"))?
            }
            Err(e) => return Err(anyhow!("failed to get surface texture: {e}")),
        };
        self.current_frame = Some(frame);
        self.vertices.clear();
        self.indices.clear();
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        let frame = self
            .current_frame
            .take()
            .ok_or_else(|| anyhow!("end_frame without begin_frame"))?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.flush(&view);
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<()> {
        self.clear_color = color;
        Ok(())
    }

    fn draw_geometry(&mut self, vertices: &[Vertex], indices: &[u32]) -> Result<()> {
        let base = u32::try_from(self.vertices.len())
            .map_err(|_| anyhow!("too many vertices in one frame"))?;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|&i| base + i));
        Ok(())
    }

    fn set_status_text(&mut self, text: &str) -> Result<()> {
        self.window.set_title(text);
        Ok(())
    }

    fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }
}
