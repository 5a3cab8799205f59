//! Orbit camera controls
//!
//! Rotates the camera around a target on a sphere and zooms along the view
//! ray. Input accumulates into pending deltas; [`OrbitControls::update`] applies
//! them once per frame. With damping enabled only a fraction of the pending
//! motion is applied per update and the rest decays, giving the camera inertia.

use std::f32::consts::{PI, TAU};

use crate::core::config::ControlsConfig;
use crate::foundation::math::{utils, Vec3};

use super::Camera;

/// Smallest polar angle kept away from the poles
const POLE_EPSILON: f32 = 1e-6;

/// Squared movement below this is not reported as a change
const CHANGE_EPSILON: f32 = 1e-6;

/// Per-step zoom multiplier at zoom speed 1.0
const ZOOM_STEP: f32 = 0.95;

/// Spherical coordinates around the orbit target
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: utils::clamp(offset.y / radius, -1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit-style camera controller
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    target: Vec3,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    /// Create controls orbiting `target`
    pub fn new(config: ControlsConfig, target: Vec3) -> Self {
        Self {
            config,
            target,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Orbit target
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Active configuration
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Queue a drag of `dx`, `dy` pixels in a viewport `viewport_height` pixels tall
    ///
    /// A drag over the full viewport height turns the camera once around.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let speed = self.config.rotate_speed;
        self.rotate_left(TAU * dx / viewport_height * speed);
        self.rotate_up(TAU * dy / viewport_height * speed);
    }

    /// Queue an azimuth change in radians
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Queue a polar change in radians
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Queue a zoom step; positive `delta` moves away from the target
    pub fn zoom(&mut self, delta: f32) {
        let step = ZOOM_STEP.powf(self.config.zoom_speed);
        if delta > 0.0 {
            self.scale /= step;
        } else if delta < 0.0 {
            self.scale *= step;
        }
    }

    /// Apply pending input to the camera
    ///
    /// Returns `true` when the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        if self.config.enable_damping {
            spherical.theta += self.delta_theta * self.config.damping_factor;
            spherical.phi += self.delta_phi * self.config.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.theta = wrap_angle(spherical.theta);
        spherical.phi = utils::clamp(
            spherical.phi,
            self.config.min_polar_angle,
            self.config.max_polar_angle,
        );
        spherical.phi = utils::clamp(spherical.phi, POLE_EPSILON, PI - POLE_EPSILON);

        spherical.radius = self.clamp_distance(spherical.radius * self.scale);

        let new_position = self.target + spherical.to_offset();
        let moved = (new_position - camera.position).magnitude_squared() > CHANGE_EPSILON;
        camera.set_position(new_position);
        camera.set_target(self.target);

        if self.config.enable_damping {
            let decay = 1.0 - self.config.damping_factor;
            self.delta_theta *= decay;
            self.delta_phi *= decay;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        moved
    }

    /// Drop pending motion
    pub fn reset(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        let max = self.config.max_distance.unwrap_or(f32::INFINITY);
        distance.max(self.config.min_distance).min(max)
    }
}

/// Wrap an angle into `(-PI, PI]`
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn undamped() -> ControlsConfig {
        ControlsConfig::default().with_damping(false, 0.05)
    }

    #[test]
    fn test_update_without_input_keeps_position() {
        let mut camera = Camera::perspective(Vec3::new(3.0, 1.5, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(undamped(), Vec3::zeros());
        let before = camera.position;
        assert!(!controls.update(&mut camera));
        assert_relative_eq!(camera.position, before, epsilon = 1e-4);
    }

    #[test]
    fn test_distance_clamped_into_range() {
        let config = undamped().with_distance_limits(2.0, Some(10.0));
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 30.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(config, Vec3::zeros());
        controls.update(&mut camera);
        assert_relative_eq!(camera.distance_to_target(), 10.0, epsilon = 1e-4);

        camera.set_position(Vec3::new(0.0, 0.0, 0.5));
        controls.update(&mut camera);
        assert_relative_eq!(camera.distance_to_target(), 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_polar_angle_stays_above_ground() {
        let config = undamped().with_max_polar_angle(PI * 0.5);
        let mut camera = Camera::perspective(Vec3::new(0.0, 2.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(config, Vec3::zeros());

        controls.rotate_up(-PI);
        controls.update(&mut camera);

        assert!(camera.position.y >= -1e-4);
        assert_relative_eq!(camera.position.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotate_left_orbits_around_target() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(undamped(), Vec3::zeros());

        controls.rotate_left(-PI * 0.5);
        assert!(controls.update(&mut camera));

        assert_relative_eq!(camera.position, Vec3::new(5.0, 0.0, 0.0), epsilon = 1e-4);
        assert_relative_eq!(camera.distance_to_target(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_damping_spreads_motion_over_frames() {
        let config = ControlsConfig::default().with_damping(true, 0.25);
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(config, Vec3::zeros());

        controls.rotate_left(-1.0);
        controls.update(&mut camera);
        let first = camera.position.x.atan2(camera.position.z);
        assert_relative_eq!(first, 0.25, epsilon = 1e-4);

        controls.update(&mut camera);
        let second = camera.position.x.atan2(camera.position.z);
        assert_relative_eq!(second, 0.25 + 0.75 * 0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_in_and_out() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        let mut controls = OrbitControls::new(undamped().with_distance_limits(0.0, None), Vec3::zeros());

        controls.zoom(-1.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.distance_to_target(), 5.0 * 0.95, epsilon = 1e-4);

        controls.zoom(1.0);
        controls.update(&mut camera);
        assert_relative_eq!(camera.distance_to_target(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotate_ignores_empty_viewport() {
        let mut controls = OrbitControls::new(undamped(), Vec3::zeros());
        controls.rotate(100.0, 100.0, 0.0);
        let mut camera = Camera::perspective(Vec3::new(0.0, 1.0, 5.0), 75.0, 1.0, 0.1, 1000.0);
        assert!(!controls.update(&mut camera));
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(PI * 1.5), -PI * 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-PI * 1.5), PI * 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(0.3), 0.3, epsilon = 1e-6);
    }
}
