//! Windowed viewer: builder and event loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::animation::AnimationDriver;
use crate::camera::OrbitCamera;
use crate::controls::{action_for_key, ControlAction, InputEvent, InputState, COARSE_STEPS};
use crate::error::{GpuError, ViewerError};
use crate::generator::GeneratorConfig;
use crate::gpu::WgpuBackend;
use crate::interaction::ZoomController;
use crate::overlay::{OverlayChange, ZoomOverlay};
use crate::params::GalaxyParameters;
use crate::star::BrightStar;
use crate::visualization::Visualization;

const WINDOW_TITLE: &str = "Galaxy";
const FPS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// A galaxy viewer builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// Viewer::new()
///     .with_parameters(GalaxyParameters { count: 500_000, ..GalaxyParameters::DEFAULT })
///     .with_seed(7)
///     .run()?;
/// ```
pub struct Viewer {
    params: GalaxyParameters,
    seed: Option<u64>,
    generator: GeneratorConfig,
    star: Option<BrightStar>,
    overlay: ZoomOverlay,
}

impl Viewer {
    /// Default parameters, the bright star, and the stock overlay.
    pub fn new() -> Self {
        Self {
            params: GalaxyParameters::DEFAULT,
            seed: None,
            generator: GeneratorConfig::DEFAULT,
            star: Some(BrightStar::DEFAULT),
            overlay: ZoomOverlay::default(),
        }
    }

    pub fn with_parameters(mut self, params: GalaxyParameters) -> Self {
        self.params = params;
        self
    }

    /// Seed the generator for a reproducible galaxy. Without a seed every run
    /// differs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_generator(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }

    /// Replace or remove (`None`) the orbiting star.
    pub fn with_star(mut self, star: Option<BrightStar>) -> Self {
        self.star = star;
        self
    }

    pub fn with_overlay(mut self, overlay: ZoomOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    /// Open the window and block until it closes.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

struct Running {
    window: Arc<Window>,
    visualization: Visualization<WgpuBackend>,
    driver: AnimationDriver,
}

struct App {
    settings: Viewer,
    running: Option<Running>,
    camera: OrbitCamera,
    zoom: ZoomController,
    input: InputState,
    last_fps_log: Instant,
    error: Option<ViewerError>,
}

impl App {
    fn new(settings: Viewer) -> Self {
        Self {
            settings,
            running: None,
            camera: OrbitCamera::new(),
            zoom: ZoomController::new(),
            input: InputState::new(),
            last_fps_log: Instant::now(),
            error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let driver = AnimationDriver::new(window.scale_factor());
        let backend = pollster::block_on(WgpuBackend::new(window.clone()))?;
        let rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let visualization = Visualization::new(
            backend,
            self.settings.params,
            self.settings.generator,
            rng,
            driver.initial_uniforms(),
            self.settings.star,
        )?;

        Ok(Running {
            window,
            visualization,
            driver,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(running) = &mut self.running {
            running.visualization.teardown();
        }
        event_loop.exit();
    }

    fn handle_input(&mut self, event_loop: &ActiveEventLoop, input: InputEvent) {
        let Some(running) = &mut self.running else {
            return;
        };
        match input {
            InputEvent::Drag(delta) => self.camera.rotate_by_drag(delta.x, delta.y),
            InputEvent::Wheel(delta_y) => {
                let distance = self.zoom.on_wheel(&mut self.camera, delta_y, Instant::now());
                match self.settings.overlay.update_zoom_level(distance) {
                    Some(OverlayChange::Shown) => {
                        let message = self.settings.overlay.message();
                        log::info!("{}", message);
                        running
                            .window
                            .set_title(&format!("{} - {}", WINDOW_TITLE, message));
                    }
                    Some(OverlayChange::Hidden) => running.window.set_title(WINDOW_TITLE),
                    None => {}
                }
            }
            InputEvent::Key { key, shift } => {
                let steps = if shift { COARSE_STEPS } else { 1 };
                let params = running.visualization.parameters();
                match action_for_key(key, params, steps) {
                    Some(ControlAction::Change(change)) => {
                        log::debug!("Parameter change: {:?}", change);
                        if let Err(e) = running.visualization.apply(change) {
                            log::error!("Regeneration failed, keeping previous galaxy: {}", e);
                        }
                    }
                    Some(ControlAction::TogglePause) => {
                        let clock = running.driver.clock_mut();
                        clock.toggle_pause();
                        log::info!("{}", if clock.is_paused() { "Paused" } else { "Resumed" });
                    }
                    Some(ControlAction::Quit) => self.shutdown(event_loop),
                    None => {}
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };
        if running.visualization.is_torn_down() {
            return;
        }

        let now = Instant::now();
        let uniforms = running
            .driver
            .tick(running.visualization.uniforms(), self.zoom.pulse(now));
        running.visualization.update_uniforms(uniforms);
        if let Some(star) = running.visualization.star().copied() {
            let star_uniforms = running.driver.current(uniforms, star.pulse());
            running.visualization.update_star_uniforms(star_uniforms);
        }

        self.camera.update();
        let (width, height) = running.visualization.backend().size();
        let matrices = self
            .camera
            .matrices(Vec2::new(width as f32, height as f32));

        match running.visualization.render(&matrices) {
            Ok(()) => {}
            Err(e @ GpuError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                self.fail(event_loop, e.into());
                return;
            }
            Err(e) => log::warn!("Render error: {}", e),
        }

        if now.duration_since(self.last_fps_log) >= FPS_LOG_INTERVAL {
            log::debug!(
                "{:.1} fps, {} points",
                running.driver.clock().fps(),
                running.visualization.point_count()
            );
            self.last_fps_log = now;
        }

        running.window.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                running.window.request_redraw();
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(physical_size) => {
                if let Some(running) = &mut self.running {
                    running
                        .visualization
                        .backend_mut()
                        .resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(running) = &mut self.running {
                    running.driver.set_pixel_ratio(scale_factor);
                    let initial = running.driver.initial_uniforms();
                    running.visualization.set_initial_uniforms(initial);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(input) = self.input.handle_event(&other) {
                    self.handle_input(event_loop, input);
                }
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &mut self.running {
            running.visualization.teardown();
        }
    }
}
