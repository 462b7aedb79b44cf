//! Application builder and winit event loop.

use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::camera::Camera;
use crate::error::AppError;
use crate::field::{FieldConfig, ParticleField};
use crate::frame::FrameState;
use crate::gpu::GpuState;
use crate::textures::TextureConfig;
use crate::trail::{GlowStamp, TrailConfig, TrailSurface};
use crate::viewport::Viewport;
use crate::visuals::DisplacementParams;

/// An interactive particle field builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
pub struct GlowField {
    grid_resolution: u32,
    trail_resolution: u32,
    extent: f32,
    fade_alpha: f32,
    speed_scale: f32,
    picture_path: Option<PathBuf>,
    stamp_path: Option<PathBuf>,
    params: DisplacementParams,
    title: String,
}

impl GlowField {
    /// Create a field with default settings: a 128x128 particle grid over a
    /// 10x10 plane, with procedural textures.
    pub fn new() -> Self {
        Self {
            grid_resolution: 128,
            trail_resolution: 128,
            extent: 10.0,
            fade_alpha: 0.02,
            speed_scale: 0.1,
            picture_path: None,
            stamp_path: None,
            params: DisplacementParams::default(),
            title: "glowfield".to_string(),
        }
    }

    /// Set particles per side; total count is this squared.
    pub fn with_grid_resolution(mut self, resolution: u32) -> Self {
        self.grid_resolution = resolution.max(1);
        self
    }

    /// Set the trail surface resolution in texels per side.
    pub fn with_trail_resolution(mut self, resolution: u32) -> Self {
        self.trail_resolution = resolution.max(1);
        self
    }

    /// Set the base picture image. Without one, a procedural luminance grid
    /// is used.
    pub fn with_picture<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.picture_path = Some(path.into());
        self
    }

    /// Set the glow stamp image. Without one, a procedural radial glow is
    /// used.
    pub fn with_glow_stamp<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.stamp_path = Some(path.into());
        self
    }

    /// Set how fast the trail fades, as the per-frame black overpaint
    /// opacity.
    pub fn with_fade_alpha(mut self, fade_alpha: f32) -> Self {
        self.fade_alpha = fade_alpha;
        self
    }

    /// Set how much cursor travel saturates the glow.
    pub fn with_speed_scale(mut self, speed_scale: f32) -> Self {
        self.speed_scale = speed_scale;
        self
    }

    /// Set the displacement and point-sizing parameters.
    pub fn with_displacement(mut self, params: DisplacementParams) -> Self {
        self.params = params;
        self
    }

    /// Set the window title.
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Open the window and run until closed.
    ///
    /// Fails if an explicitly requested image cannot be loaded or the event
    /// loop cannot be created. Procedural fallbacks never fail.
    pub fn run(self) -> Result<(), AppError> {
        let picture = match &self.picture_path {
            Some(path) => TextureConfig::from_file(path)?,
            None => TextureConfig::luminance_grid(256, 16),
        };
        let stamp = match &self.stamp_path {
            Some(path) => TextureConfig::from_file(path)?,
            None => TextureConfig::radial_glow(128),
        };

        let field = ParticleField::new(FieldConfig::new(self.grid_resolution).with_extent(self.extent));

        let mut trail = TrailSurface::new(
            TrailConfig::new(self.trail_resolution, self.trail_resolution)
                .with_fade_alpha(self.fade_alpha)
                .with_speed_scale(self.speed_scale),
        );
        trail.set_stamp(GlowStamp::new(stamp));

        let frame = FrameState::new(trail, self.extent);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App {
            window: None,
            gpu_state: None,
            field: Some(field),
            picture: Some(picture),
            params: self.params,
            title: self.title,
            frame,
            camera: Camera::new(),
            viewport: Viewport::default(),
            scale_factor: 1.0,
            mouse_pressed: false,
            last_mouse_pos: None,
        };
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl Default for GlowField {
    fn default() -> Self {
        Self::new()
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    // Consumed when the window comes up.
    field: Option<ParticleField>,
    picture: Option<TextureConfig>,
    params: DisplacementParams,
    title: String,
    frame: FrameState,
    camera: Camera,
    viewport: Viewport,
    scale_factor: f64,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

            let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
            self.scale_factor = window.scale_factor();

            let size = window.inner_size();
            let logical = size.to_logical::<u32>(self.scale_factor);
            self.viewport.resize(logical.width, logical.height);
            self.viewport.set_pixel_ratio(self.scale_factor as f32);

            let field = self.field.take().expect("field consumed twice");
            let picture = self.picture.take().expect("picture consumed twice");
            self.window = Some(window.clone());
            self.gpu_state = Some(pollster::block_on(GpuState::new(
                window,
                &field,
                &picture,
                self.frame.trail.width(),
                self.frame.trail.height(),
                self.params,
            )));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                let logical = physical_size.to_logical::<u32>(self.scale_factor);
                self.viewport.resize(logical.width, logical.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = scale_factor;
                self.viewport.set_pixel_ratio(scale_factor as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                // Pointer painting is always live; dragging also orbits.
                self.frame.pointer.record(
                    (position.x / self.scale_factor) as f32,
                    (position.y / self.scale_factor) as f32,
                    &self.viewport,
                );
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = position.x - last_x;
                        let dy = position.y - last_y;
                        self.camera.yaw -= dx as f32 * 0.005;
                        self.camera.pitch += dy as f32 * 0.005;
                        self.camera.pitch = self.camera.pitch.clamp(-1.5, 1.5);
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                self.camera.distance -= scroll * 0.5;
                self.camera.distance = self.camera.distance.clamp(5.0, 40.0);
            }
            WindowEvent::RedrawRequested => {
                self.frame.tick(&self.camera, &self.viewport);

                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.trail_texture.mark_dirty();
                    let resolution = self.viewport.resolution().max(Vec2::ONE);
                    match gpu_state.render(&self.camera, resolution, self.frame.trail.pixels()) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
