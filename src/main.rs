use std::sync::Arc;

use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    error::EventLoopError,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod capture;
mod mesh;
mod renderer;
mod scene;

use capture::CaptureSession;
use renderer::{Camera, GpuError, GpuState, SceneUniform, SpotlightRig};
use scene::{SceneAssets, SceneConfig, SceneLoadError};

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneLoadError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
}

struct App {
    config: SceneConfig,
    assets: SceneAssets,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,

    camera: Camera,
    spotlights: SpotlightRig,
    captures: CaptureSession,
    capture_requested: bool,

    fatal: Option<AppError>,
}

impl App {
    fn new(config: SceneConfig, assets: SceneAssets) -> Self {
        let (width, height) = config.window_size;
        Self {
            camera: Camera::new(&config.camera, width, height),
            spotlights: SpotlightRig::new(config.spotlights, config.orbit),
            captures: CaptureSession::new(config.capture_dir.clone()),
            capture_requested: false,

            window: None,
            gpu: None,

            fatal: None,
            config,
            assets,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let (width, height) = self.config.window_size;
        let window_attrs = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            &self.assets,
            self.config.clear_color,
        ))?;

        self.camera
            .set_aspect(gpu.config.width as f32, gpu.config.height as f32);
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn render(&mut self) {
        let Some(gpu) = &mut self.gpu else { return };

        self.spotlights.advance();
        let uniform = SceneUniform::new(&self.camera, &self.spotlights, self.config.attenuation);
        gpu.update_scene(&uniform);
        gpu.render();

        if std::mem::take(&mut self.capture_requested) {
            let result = gpu
                .capture()
                .and_then(|image| self.captures.dump(&self.config.capture_prefix, &image));
            if let Err(e) = result {
                log::error!("capture abandoned: {e}");
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed || event.repeat {
            return;
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::KeyP) => {
                log::info!("capture {} requested", self.captures.next_sequence());
                self.capture_requested = true;
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),

            WindowEvent::RedrawRequested => self.render(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = SceneConfig::default();
    let assets = SceneAssets::load(&config)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, assets);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
