//! Viewer session
//!
//! A [`Viewer`] owns everything one model viewer needs: camera, orbit
//! controls, light rig, scene and render backend. It is built from a
//! [`ViewerConfig`] and nothing else, so several sessions can coexist.

use std::collections::VecDeque;
use std::path::Path;

use thiserror::Error;

use crate::application::{AppEvent, Application};
use crate::assets::{GltfLoader, LoadError, LoadStatus, MaterialPass, MaterialReport};
use crate::config::ConfigError;
use crate::core::config::{ViewerConfig, ViewportConfig};
use crate::foundation::collections::{Handle, HandleMap};
use crate::foundation::time::Timer;
use crate::render::{Camera, FrameData, LightingEnvironment, OrbitControls, RenderBackend, RenderError};
use crate::scene::{GroundPlane, Scene};

/// Callback notified of loading indicator changes
pub type StatusListener = Box<dyn FnMut(&LoadStatus)>;

/// Viewer session errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Configuration was rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model could not be loaded
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Render backend failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Viewport with zero width or height
    #[error("Invalid viewport size {width}x{height}")]
    InvalidViewport {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Application callback failed
    #[error("Application error: {0}")]
    Application(String),
}

/// One model viewer session
pub struct Viewer<B: RenderBackend> {
    config: ViewerConfig,
    backend: B,
    camera: Camera,
    controls: OrbitControls,
    lighting: LightingEnvironment,
    scene: Scene,
    viewport: ViewportConfig,
    timer: Timer,
    listeners: HandleMap<StatusListener>,
    pending_events: VecDeque<AppEvent>,
    status: Option<LoadStatus>,
    report: Option<MaterialReport>,
    running: bool,
    torn_down: bool,
}

impl<B: RenderBackend> Viewer<B> {
    /// Build a session from `config`, rendering through `backend`
    pub fn new(config: ViewerConfig, mut backend: B) -> Result<Self, ViewerError> {
        config.validate()?;
        log::info!("Initializing viewer...");

        let viewport = config.viewport;
        backend.configure(&config.renderer)?;
        backend.resize(viewport.width, viewport.height)?;

        let mut camera = Camera::perspective(
            config.camera.position,
            config.camera.fov_degrees,
            viewport.aspect_ratio(),
            config.camera.near,
            config.camera.far,
        );
        camera.set_target(config.camera.target);
        let controls = OrbitControls::new(config.controls.clone(), config.camera.target);

        let mut scene = Scene::new(config.background);
        if config.ground.enabled {
            scene = scene.with_ground(GroundPlane::from_config(&config.ground));
        }
        let lighting = config.lighting.clone();

        log::info!(
            "Viewer ready: {}x{} viewport, {} lights ({} casting shadows)",
            viewport.width,
            viewport.height,
            lighting.lights.len(),
            lighting.shadow_caster_count()
        );

        Ok(Self {
            config,
            backend,
            camera,
            controls,
            lighting,
            scene,
            viewport,
            timer: Timer::new(),
            listeners: HandleMap::new(),
            pending_events: VecDeque::new(),
            status: None,
            report: None,
            running: true,
            torn_down: false,
        })
    }

    /// Run a session driven by `app` until it closes or hits the frame limit
    ///
    /// The configured model is loaded after `initialize`. A failed load is
    /// reported through [`Application::on_status`] and the loop continues with
    /// an empty scene.
    pub fn run<A: Application>(config: ViewerConfig, backend: B, app: &mut A) -> Result<(), ViewerError> {
        let mut viewer = Self::new(config, backend)?;

        app.initialize(&mut viewer)
            .map_err(|e| ViewerError::Application(format!("App initialization: {e}")))?;

        if let Some(path) = viewer.config.model.path.clone() {
            if let Err(e) = viewer.load_model(&path, |status| app.on_status(status)) {
                log::warn!("Continuing with an empty scene: {e}");
            }
        }

        log::info!("Starting render loop...");
        let result = viewer.run_loop(app);

        app.cleanup(&mut viewer);
        viewer.teardown();

        log::info!("Viewer shutdown complete");
        result
    }

    fn run_loop<A: Application>(&mut self, app: &mut A) -> Result<(), ViewerError> {
        while self.running && !self.frame_limit_reached() {
            let delta_time = self.timer.tick();

            app.update(self, delta_time)
                .map_err(|e| ViewerError::Application(format!("App update: {e}")))?;

            self.frame(delta_time)?;
        }
        Ok(())
    }

    /// Load a model, run the material pass and add it to the scene
    ///
    /// Every indicator change goes to `on_status` and to all registered
    /// listeners. On failure the status becomes [`LoadStatus::Failed`], the
    /// scene is left as it was and no retry is attempted.
    pub fn load_model<F>(&mut self, path: impl AsRef<Path>, mut on_status: F) -> Result<MaterialReport, ViewerError>
    where
        F: FnMut(&LoadStatus),
    {
        let path = path.as_ref();
        self.publish_status(LoadStatus::Loading(None), &mut on_status);

        let loaded = GltfLoader::load(path, |progress| self.publish_status(progress.status(), &mut on_status));
        let mut model = match loaded {
            Ok(model) => model,
            Err(e) => {
                log::error!("Failed to load model {}: {}", path.display(), e);
                self.publish_status(LoadStatus::Failed, &mut on_status);
                return Err(e.into());
            }
        };

        let report = MaterialPass::new(self.config.model.classify_materials).run(&mut model);
        self.scene.add_model(model, &self.config.model);
        self.report = Some(report.clone());
        self.publish_status(LoadStatus::Loaded, &mut on_status);

        Ok(report)
    }

    fn publish_status(&mut self, status: LoadStatus, on_status: &mut dyn FnMut(&LoadStatus)) {
        if self.status == Some(status) {
            return;
        }
        log::debug!("Load status: {:?}", status);
        self.status = Some(status);
        on_status(&status);
        for (_, listener) in &mut self.listeners {
            listener(&status);
        }
    }

    /// Register a loading indicator listener
    pub fn add_status_listener(&mut self, listener: impl FnMut(&LoadStatus) + 'static) -> Handle {
        self.listeners.insert(Box::new(listener))
    }

    /// Unregister a listener; `false` if it was already gone
    pub fn remove_status_listener(&mut self, handle: Handle) -> bool {
        self.listeners.remove(handle).is_some()
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Queue an input event for the next frame
    pub fn queue_event(&mut self, event: AppEvent) {
        if self.torn_down {
            log::debug!("Dropping {:?}: viewer torn down", event);
            return;
        }
        self.pending_events.push_back(event);
    }

    /// Handle an input event immediately
    pub fn handle_event(&mut self, event: AppEvent) -> Result<(), ViewerError> {
        match event {
            AppEvent::Resized { width, height } => match self.resize(width, height) {
                Err(ViewerError::InvalidViewport { width, height }) => {
                    log::warn!("Ignoring resize to {}x{}", width, height);
                    Ok(())
                }
                other => other,
            },
            AppEvent::Orbit { dx, dy } => {
                self.controls.rotate(dx, dy, self.viewport.height as f32);
                Ok(())
            }
            AppEvent::Zoom { delta } => {
                self.controls.zoom(delta);
                Ok(())
            }
            AppEvent::CloseRequested => {
                self.quit();
                Ok(())
            }
        }
    }

    /// Resize the viewport, camera aspect ratio and backend surface
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ViewerError> {
        if width == 0 || height == 0 {
            return Err(ViewerError::InvalidViewport { width, height });
        }
        self.viewport = ViewportConfig::new(width, height);
        self.camera.set_aspect_ratio(self.viewport.aspect_ratio());
        self.backend.resize(width, height)?;
        Ok(())
    }

    /// Process queued events, update controls and render one frame
    pub fn frame(&mut self, delta_time: f32) -> Result<(), ViewerError> {
        if self.torn_down {
            return Err(RenderError::Disposed.into());
        }

        while let Some(event) = self.pending_events.pop_front() {
            self.handle_event(event)?;
        }

        self.controls.update(&mut self.camera);

        let frame = FrameData {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
            camera_position: self.camera.position,
            background: self.scene.background(),
            viewport: (self.viewport.width, self.viewport.height),
            visible_meshes: self.scene.visible_mesh_count(),
            dirty_materials: self.scene.materials().iter().filter(|m| m.needs_update).count(),
            light_count: self.lighting.lights.len(),
            shadow_casters: if self.config.renderer.shadows_enabled {
                self.lighting.shadow_caster_count()
            } else {
                0
            },
        };
        self.backend.render(&frame)?;
        self.scene.mark_materials_synced();

        self.timer.advance(delta_time);
        if self.frame_limit_reached() {
            log::info!("Frame limit of {} reached", self.timer.frame_count());
            self.running = false;
        }
        Ok(())
    }

    fn frame_limit_reached(&self) -> bool {
        self.config.engine.frame_limit.is_some_and(|limit| self.timer.frame_count() >= limit)
    }

    /// Request the render loop to stop
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Viewer shutdown requested");
        }
        self.running = false;
    }

    /// Release the session
    ///
    /// Detaches listeners, drops queued input, disposes the backend and clears
    /// the scene. Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        log::info!(
            "Tearing down viewer after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        self.listeners.clear();
        self.pending_events.clear();
        self.controls.reset();
        self.backend.dispose();
        self.scene.clear();
        self.running = false;
        self.torn_down = true;
    }

    /// Active configuration
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Orbit controls
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Light rig
    pub fn lighting(&self) -> &LightingEnvironment {
        &self.lighting
    }

    /// Scene contents
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Render backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current viewport
    pub fn viewport(&self) -> ViewportConfig {
        self.viewport
    }

    /// Latest loading indicator state
    pub fn status(&self) -> Option<LoadStatus> {
        self.status
    }

    /// Report of the last successful material pass
    pub fn report(&self) -> Option<&MaterialReport> {
        self.report.as_ref()
    }

    /// Frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Sum of the frame times passed to [`Viewer::frame`]
    pub fn elapsed(&self) -> f32 {
        self.timer.total_time()
    }

    /// Frames per second over the frames rendered so far
    pub fn average_fps(&self) -> f32 {
        self.timer.average_fps()
    }

    /// Input events waiting for the next frame
    pub fn pending_event_count(&self) -> usize {
        self.pending_events.len()
    }

    /// Whether the render loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether [`Viewer::teardown`] has run
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

impl<B: RenderBackend> Drop for Viewer<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::render::HeadlessBackend;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn viewer() -> Viewer<HeadlessBackend> {
        let config = ViewerConfig::showroom().with_viewport(800, 600);
        Viewer::new(config, HeadlessBackend::new(1, 1)).unwrap()
    }

    #[test]
    fn test_new_configures_backend() {
        let viewer = viewer();
        assert_eq!(viewer.backend().extent(), (800, 600));
        assert!(viewer.backend().settings().is_some());
        assert_relative_eq!(viewer.camera().aspect, 800.0 / 600.0);
        assert!(viewer.scene().ground().is_some());
        assert_eq!(viewer.lighting().lights.len(), 5);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ViewerConfig::showroom().with_viewport(0, 600);
        let result = Viewer::new(config, HeadlessBackend::new(1, 1));
        assert!(matches!(result, Err(ViewerError::Config(_))));
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut viewer = viewer();
        viewer.handle_event(AppEvent::Resized { width: 0, height: 300 }).unwrap();
        assert_eq!(viewer.viewport(), ViewportConfig::new(800, 600));
        assert_eq!(viewer.backend().resize_count(), 1);
        assert!(matches!(viewer.resize(100, 0), Err(ViewerError::InvalidViewport { .. })));
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut viewer = viewer();
        viewer.queue_event(AppEvent::Resized { width: 1000, height: 500 });
        viewer.frame(0.016).unwrap();

        assert_relative_eq!(viewer.camera().aspect, 2.0);
        assert_eq!(viewer.backend().extent(), (1000, 500));
        assert_eq!(viewer.backend().last_frame().map(|f| f.viewport), Some((1000, 500)));
    }

    #[test]
    fn test_orbit_moves_camera() {
        let mut viewer = viewer();
        viewer.frame(0.016).unwrap();
        let before = viewer.camera().position;

        viewer.queue_event(AppEvent::Orbit { dx: 120.0, dy: 0.0 });
        viewer.frame(0.016).unwrap();

        assert!((viewer.camera().position - before).magnitude() > 1e-3);
    }

    #[test]
    fn test_frame_reports_scene() {
        let mut viewer = viewer();
        viewer.frame(0.016).unwrap();

        let frame = viewer.backend().last_frame().unwrap();
        assert_eq!(frame.visible_meshes, 0);
        assert_eq!(frame.light_count, 5);
        assert_eq!(frame.shadow_casters, 1);
        assert_eq!(viewer.frame_count(), 1);
    }

    #[test]
    fn test_frame_times_accumulate() {
        let mut viewer = viewer();
        viewer.frame(0.5).unwrap();
        viewer.frame(0.5).unwrap();

        assert_eq!(viewer.frame_count(), 2);
        assert_relative_eq!(viewer.elapsed(), 1.0);
        assert_relative_eq!(viewer.average_fps(), 2.0);
    }

    #[test]
    fn test_close_request_stops_loop() {
        let mut viewer = viewer();
        viewer.queue_event(AppEvent::CloseRequested);
        viewer.frame(0.016).unwrap();
        assert!(!viewer.is_running());
    }

    #[test]
    fn test_failed_load_reports_status() {
        let mut viewer = viewer();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        viewer.add_status_listener(move |status| sink.borrow_mut().push(*status));

        let mut direct = Vec::new();
        let result = viewer.load_model("missing/model.glb", |status| direct.push(*status));

        assert!(matches!(result, Err(ViewerError::Load(LoadError::Io(_)))));
        assert_eq!(direct, vec![LoadStatus::Loading(None), LoadStatus::Failed]);
        assert_eq!(*seen.borrow(), direct);
        assert_eq!(viewer.status(), Some(LoadStatus::Failed));
        assert!(viewer.scene().is_empty());
    }

    #[test]
    fn test_remove_listener() {
        let mut viewer = viewer();
        let handle = viewer.add_status_listener(|_| {});
        assert_eq!(viewer.listener_count(), 1);
        assert!(viewer.remove_status_listener(handle));
        assert!(!viewer.remove_status_listener(handle));
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut viewer = viewer();
        viewer.add_status_listener(|_| {});
        viewer.queue_event(AppEvent::Zoom { delta: 1.0 });
        assert_eq!(viewer.pending_event_count(), 1);

        viewer.teardown();
        viewer.teardown();

        assert!(viewer.is_torn_down());
        assert!(viewer.backend().is_disposed());
        assert_eq!(viewer.listener_count(), 0);
        assert_eq!(viewer.pending_event_count(), 0);
        assert!(matches!(viewer.frame(0.016), Err(ViewerError::Render(RenderError::Disposed))));
    }

    #[test]
    fn test_events_after_teardown_are_dropped() {
        let mut viewer = viewer();
        viewer.teardown();

        viewer.queue_event(AppEvent::Orbit { dx: 10.0, dy: 0.0 });
        viewer.queue_event(AppEvent::CloseRequested);

        assert_eq!(viewer.pending_event_count(), 0);
    }

    struct CloseAfter {
        remaining: u32,
        initialized: bool,
        cleaned_up: bool,
        statuses: Vec<LoadStatus>,
    }

    impl Application for CloseAfter {
        fn initialize<B: RenderBackend>(&mut self, _viewer: &mut Viewer<B>) -> Result<(), AppError> {
            self.initialized = true;
            Ok(())
        }

        fn update<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>, _delta_time: f32) -> Result<(), AppError> {
            if self.remaining == 0 {
                viewer.queue_event(AppEvent::CloseRequested);
            } else {
                self.remaining -= 1;
            }
            Ok(())
        }

        fn on_status(&mut self, status: &LoadStatus) {
            self.statuses.push(*status);
        }

        fn cleanup<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>) {
            assert!(!viewer.is_torn_down());
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_run_until_close() {
        let mut app = CloseAfter {
            remaining: 3,
            initialized: false,
            cleaned_up: false,
            statuses: Vec::new(),
        };
        let config = ViewerConfig::showroom().with_model_path("missing/car.glb");
        Viewer::run(config, HeadlessBackend::new(640, 480), &mut app).unwrap();

        assert!(app.initialized);
        assert!(app.cleaned_up);
        assert_eq!(app.statuses.last(), Some(&LoadStatus::Failed));
    }

    #[test]
    fn test_run_stops_at_frame_limit() {
        let mut app = CloseAfter {
            remaining: u32::MAX,
            initialized: false,
            cleaned_up: false,
            statuses: Vec::new(),
        };
        let mut config = ViewerConfig::night();
        config.model.path = None;
        config.engine = config.engine.with_frame_limit(5);
        Viewer::run(config, HeadlessBackend::new(640, 480), &mut app).unwrap();

        assert!(app.cleaned_up);
        assert!(app.statuses.is_empty());
    }
}
