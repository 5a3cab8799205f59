//! Showroom viewer
//!
//! Loads a glTF model with the showroom or night preset, runs the material
//! pass and renders a fixed number of frames through the headless backend.

mod cli;

use showroom_engine::assets::{LoadStatus, MaterialCategory};
use showroom_engine::config::Config;
use showroom_engine::foundation::logging;
use showroom_engine::render::{HeadlessBackend, RenderBackend};
use showroom_engine::{AppError, AppEvent, Application, Viewer};

/// Headless viewer application
struct ShowroomApp {
    orbit_speed: f32,
    last_status: Option<LoadStatus>,
}

impl ShowroomApp {
    fn new(orbit_speed: f32) -> Self {
        Self {
            orbit_speed,
            last_status: None,
        }
    }
}

impl Application for ShowroomApp {
    fn initialize<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>) -> Result<(), AppError> {
        let config = viewer.config();
        log::info!(
            "Showroom viewer: model {:?}, frame limit {:?}, material pass {}",
            config.model.path,
            config.engine.frame_limit,
            if config.model.classify_materials { "on" } else { "off" }
        );
        Ok(())
    }

    fn update<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>, _delta_time: f32) -> Result<(), AppError> {
        if self.orbit_speed != 0.0 {
            viewer.queue_event(AppEvent::Orbit {
                dx: self.orbit_speed,
                dy: 0.0,
            });
        }
        Ok(())
    }

    fn on_status(&mut self, status: &LoadStatus) {
        match status {
            LoadStatus::Failed => log::error!("{status}"),
            LoadStatus::Loaded => log::info!("Model loaded"),
            LoadStatus::Loading(_) => log::info!("{status}"),
        }
        self.last_status = Some(*status);
    }

    fn cleanup<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>) {
        if let Some(report) = viewer.report() {
            for category in MaterialCategory::ALL {
                log::info!("  {:<8} {}", category.label(), report.count(category));
            }
            log::info!("{report}");
        } else if self.last_status == Some(LoadStatus::Failed) {
            log::warn!("Rendered an empty scene: the model could not be loaded");
        }

        let position = viewer.camera().position;
        log::info!(
            "Rendered {} frames ({:.1} fps); camera at ({:.2}, {:.2}, {:.2})",
            viewer.frame_count(),
            viewer.average_fps(),
            position.x,
            position.y,
            position.z
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = cli::parse()?;

    if let Err(e) = logging::init(&options.config.engine.log_level) {
        eprintln!("Logger already initialized: {e}");
    }
    log::info!("Starting showroom viewer");

    if let Some(path) = &options.save_config {
        options.config.save_to_file(path)?;
        log::info!("Saved configuration to {}", path.display());
    }

    let viewport = options.config.viewport;
    let backend = HeadlessBackend::new(viewport.width, viewport.height);
    let mut app = ShowroomApp::new(options.orbit_speed);

    match Viewer::run(options.config, backend, &mut app) {
        Ok(()) => {
            log::info!("Showroom viewer finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Viewer error: {e}");
            Err(e.into())
        }
    }
}
