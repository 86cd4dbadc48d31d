use ppmview_std::Error;
use ppmview_wgpu::{PipelineWrapper, wgpu};
use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

pub struct State {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    new_size: Option<PhysicalSize<u32>>,

    image: PipelineWrapper,

    // Make sure that the winit window is last in the struct so that
    // it is dropped after the wgpu surface is dropped.
    window: Arc<Window>,
}

impl State {
    pub async fn new(window: Window, width: u32, height: u32) -> Result<Self, Error> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let window = Arc::new(window);

        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|err| Error::subsystem("unable to create rendering surface", err))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| Error::subsystem("unable to obtain wgpu adapter", err))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                ..Default::default()
            })
            .await
            .map_err(|err| Error::subsystem("unable to create rendering context", err))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| {
                Error::subsystem(
                    "unable to create rendering context",
                    "surface is not compatible with the adapter",
                )
            })?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };

        surface.configure(&device, &config);

        let image = PipelineWrapper::new(&device, format, width, height);

        tracing::debug!(
            adapter = %adapter.get_info().name,
            ?format,
            "rendering context ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            new_size: None,
            image,
            window,
        })
    }

    pub const fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.new_size = Some(new_size);
    }

    pub fn on_lost(&mut self) {
        self.resize(self.size);
    }

    pub fn update_texture(&self, rgba: &[u8]) {
        self.image.update_texture(&self.queue, rgba);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if let Some(new_size) = self.new_size.take() {
            self.size = new_size;
            self.config.width = new_size.width.max(1);
            self.config.height = new_size.height.max(1);
            self.surface.configure(&self.device, &self.config);
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.image.paint(&mut render_pass);
        }

        self.queue.submit(core::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();

        Ok(())
    }
}
