//! Backend abstraction for the rendering system
//!
//! The viewer describes each frame with [`FrameData`] and hands it to a
//! [`RenderBackend`]. GPU backends live outside this crate; the
//! [`HeadlessBackend`] records what it was asked to draw.

use thiserror::Error;

use crate::core::config::RendererSettings;
use crate::foundation::math::{Mat4, Vec3};

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Backend initialization failed
    #[error("Renderer initialization failed: {0}")]
    InitializationFailed(String),

    /// A frame could not be rendered
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// The backend was used after `dispose`
    #[error("Render backend has been disposed")]
    Disposed,
}

/// Per-frame data handed to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// World-to-view transform
    pub view: Mat4,
    /// View-to-clip transform
    pub projection: Mat4,
    /// Camera position in world space
    pub camera_position: Vec3,
    /// Clear color as linear RGB
    pub background: Vec3,
    /// Viewport size in pixels
    pub viewport: (u32, u32),
    /// Mesh nodes to draw
    pub visible_meshes: usize,
    /// Materials that changed since the last frame
    pub dirty_materials: usize,
    /// Lights in the scene
    pub light_count: usize,
    /// Lights that render shadow maps
    pub shadow_casters: usize,
}

/// Main rendering backend trait
pub trait RenderBackend {
    /// Apply renderer output settings
    ///
    /// Called once before the first frame.
    fn configure(&mut self, _settings: &RendererSettings) -> BackendResult<()> {
        Ok(())
    }

    /// Resize the drawing surface
    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Draw one frame
    fn render(&mut self, frame: &FrameData) -> BackendResult<()>;

    /// Release all backend resources
    ///
    /// Calling it again is a no-op.
    fn dispose(&mut self);

    /// Current surface size
    fn extent(&self) -> (u32, u32);

    /// Whether `dispose` has run
    fn is_disposed(&self) -> bool;
}

/// Backend that draws nothing and records every request
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    extent: (u32, u32),
    settings: Option<RendererSettings>,
    frames_rendered: u64,
    resize_count: u32,
    last_frame: Option<FrameData>,
    disposed: bool,
}

impl HeadlessBackend {
    /// Create a headless backend with the given surface size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            extent: (width, height),
            ..Self::default()
        }
    }

    /// Number of frames rendered
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of resize requests handled
    pub fn resize_count(&self) -> u32 {
        self.resize_count
    }

    /// Most recently rendered frame
    pub fn last_frame(&self) -> Option<&FrameData> {
        self.last_frame.as_ref()
    }

    /// Settings passed to `configure`
    pub fn settings(&self) -> Option<&RendererSettings> {
        self.settings.as_ref()
    }

    fn ensure_alive(&self) -> BackendResult<()> {
        if self.disposed {
            Err(RenderError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl RenderBackend for HeadlessBackend {
    fn configure(&mut self, settings: &RendererSettings) -> BackendResult<()> {
        self.ensure_alive()?;
        log::debug!(
            "Headless backend configured: tone mapping {:?} at exposure {}, shadows {}",
            settings.tone_mapping,
            settings.tone_mapping_exposure,
            settings.shadows_enabled
        );
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.ensure_alive()?;
        self.extent = (width, height);
        self.resize_count += 1;
        log::debug!("Headless backend resized to {}x{}", width, height);
        Ok(())
    }

    fn render(&mut self, frame: &FrameData) -> BackendResult<()> {
        self.ensure_alive()?;
        self.frames_rendered += 1;
        log::trace!(
            "Frame {}: {} meshes, {} lights",
            self.frames_rendered,
            frame.visible_meshes,
            frame.light_count
        );
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::info!("Headless backend disposed after {} frames", self.frames_rendered);
        self.last_frame = None;
        self.disposed = true;
    }

    fn extent(&self) -> (u32, u32) {
        self.extent
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameData {
        FrameData {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::new(0.0, 0.0, 5.0),
            background: Vec3::zeros(),
            viewport: (640, 480),
            visible_meshes: 3,
            dirty_materials: 0,
            light_count: 4,
            shadow_casters: 1,
        }
    }

    #[test]
    fn test_records_frames() {
        let mut backend = HeadlessBackend::new(640, 480);
        backend.render(&frame()).unwrap();
        backend.render(&frame()).unwrap();

        assert_eq!(backend.frames_rendered(), 2);
        assert_eq!(backend.last_frame().map(|f| f.visible_meshes), Some(3));
    }

    #[test]
    fn test_resize_updates_extent() {
        let mut backend = HeadlessBackend::new(640, 480);
        backend.resize(1920, 1080).unwrap();
        assert_eq!(backend.extent(), (1920, 1080));
        assert_eq!(backend.resize_count(), 1);
    }

    #[test]
    fn test_use_after_dispose() {
        let mut backend = HeadlessBackend::new(640, 480);
        backend.dispose();
        backend.dispose();

        assert!(backend.is_disposed());
        assert_eq!(backend.render(&frame()), Err(RenderError::Disposed));
        assert_eq!(backend.resize(10, 10), Err(RenderError::Disposed));
        assert!(backend.configure(&RendererSettings::default()).is_err());
    }
}
