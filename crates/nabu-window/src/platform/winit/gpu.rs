use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::window::Window;

use crate::platform::ContextRequest;

use super::WinitConfig;

/// Adapter and device requirements for one rung of the context ladder.
#[derive(Debug, Clone)]
pub(super) struct ContextProfile {
    pub label: &'static str,
    pub power_preference: wgpu::PowerPreference,
    pub limits: wgpu::Limits,
    pub flags: wgpu::InstanceFlags,
}

impl ContextProfile {
    /// 3.0 and above request full default limits; older versions request
    /// WebGL2-class downlevel limits.
    pub fn versioned(request: &ContextRequest, config: &WinitConfig) -> Self {
        let limits = if request.major >= 3 {
            wgpu::Limits::default()
        } else {
            wgpu::Limits::downlevel_webgl2_defaults()
        };
        let flags = if request.debug {
            wgpu::InstanceFlags::debugging()
        } else {
            wgpu::InstanceFlags::empty()
        };

        Self {
            label: "nabu versioned context",
            power_preference: config.power_preference,
            limits,
            flags,
        }
    }

    pub fn basic() -> Self {
        Self {
            label: "nabu basic context",
            power_preference: wgpu::PowerPreference::LowPower,
            limits: wgpu::Limits::downlevel_defaults(),
            flags: wgpu::InstanceFlags::empty(),
        }
    }
}

/// Response after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) enum SurfaceErrorAction {
    Reconfigured,
    SkipFrame,
    Fatal,
}

/// A rendering context: device, queue, and a surface bound to one window.
///
/// Holding the `Arc<Window>` keeps the surface's window alive for as long as
/// the context exists.
pub(super) struct GpuContext {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    clear: wgpu::Color,
}

impl GpuContext {
    pub async fn new(
        window: Arc<Window>,
        profile: &ContextProfile,
        settings: &WinitConfig,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: profile.flags,
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: profile.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(profile.label),
                required_features: wgpu::Features::empty(),
                required_limits: profile.limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .with_context(|| format!("failed to create device for {}", profile.label))?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps).context("no supported surface formats")?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: settings.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        log::debug!(
            "{} ready on {:?} ({:?}, {}x{})",
            profile.label,
            adapter.get_info().backend,
            format,
            config.width,
            config.height
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            clear: settings.clear_color,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn set_clear_color(&mut self, clear: wgpu::Color) {
        self.clear = clear;
    }

    /// Reconfigures the surface. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if self.config.width == width && self.config.height == height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn set_vsync(&mut self, enabled: bool) {
        self.config.present_mode = if enabled {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        self.surface.configure(&self.device, &self.config);
    }

    /// Clears the next frame and presents it.
    pub fn present(&mut self) -> Option<SurfaceErrorAction> {
        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(err) => return Some(self.handle_surface_error(err)),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("nabu frame encoder"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("nabu clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        surface_texture.present();
        None
    }

    fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => {
                self.surface.configure(&self.device, &self.config);
                SurfaceErrorAction::Reconfigured
            }
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

fn choose_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    let preferred = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    preferred
        .into_iter()
        .find(|f| caps.formats.contains(f))
        .or_else(|| caps.formats.first().copied())
}
