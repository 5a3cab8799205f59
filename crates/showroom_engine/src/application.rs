//! Application trait and lifecycle management

use thiserror::Error;

use crate::assets::LoadStatus;
use crate::engine::{Viewer, ViewerError};
use crate::render::RenderBackend;

/// Application lifecycle trait
///
/// Implement this trait to drive a viewer session with [`Viewer::run`].
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the viewer is built and before the model loads.
    fn initialize<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame before the viewer renders. Queue input events on the
    /// viewer here.
    ///
    /// # Arguments
    /// * `viewer` - Mutable reference to the viewer
    /// * `delta_time` - Time since last frame in seconds
    fn update<B: RenderBackend>(&mut self, _viewer: &mut Viewer<B>, _delta_time: f32) -> Result<(), AppError> {
        Ok(())
    }

    /// Receive a loading indicator update
    fn on_status(&mut self, _status: &LoadStatus) {}

    /// Cleanup the application
    ///
    /// Called once after the render loop ends, before the viewer tears down.
    fn cleanup<B: RenderBackend>(&mut self, viewer: &mut Viewer<B>);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Viewer error propagated to application level
    #[error("Viewer error: {0}")]
    Viewer(#[from] ViewerError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

/// Input events delivered to the viewer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Drawing surface was resized
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },

    /// Pointer drag that orbits the camera
    Orbit {
        /// Horizontal drag in pixels
        dx: f32,
        /// Vertical drag in pixels
        dy: f32,
    },

    /// Wheel or pinch zoom; positive moves away from the target
    Zoom {
        /// Zoom amount
        delta: f32,
    },

    /// Close requested
    CloseRequested,
}
