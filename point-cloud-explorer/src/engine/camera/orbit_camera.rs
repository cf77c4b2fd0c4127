use constants::camera::*;

use crate::engine::assets::bounds::BoundingRegion;
use crate::engine::error::RegionError;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tunable orbit camera limits and sensitivities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub drag_sensitivity: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub polar_epsilon: f32,
    pub auto_rotate_speed: f32,
    pub idle_resume_secs: f32,
    pub fit_offset_ratio: f32,
    pub fallback_distance: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: FOV_DEGREES,
            drag_sensitivity: DRAG_SENSITIVITY,
            pan_speed: PAN_SPEED,
            zoom_speed: ZOOM_SPEED,
            min_distance: MIN_DISTANCE,
            max_distance: MAX_DISTANCE,
            polar_epsilon: POLAR_EPSILON,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            idle_resume_secs: IDLE_RESUME_SECS,
            fit_offset_ratio: FIT_OFFSET_RATIO,
            fallback_distance: FALLBACK_DISTANCE,
        }
    }
}

impl CameraSettings {
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

/// Spherical camera pose around a look-target.
///
/// The camera world position is always derived from these four values;
/// nothing else stores a camera position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
    pub target: Vec3,
}

impl CameraState {
    pub fn position(&self) -> Vec3 {
        self.target + spherical_offset(self.azimuth, self.polar, self.distance)
    }
}

/// Cartesian offset for a spherical direction, with +Y as the polar axis and
/// azimuth zero pointing down +Z.
pub fn spherical_offset(azimuth: f32, polar: f32, radius: f32) -> Vec3 {
    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();
    Vec3::new(
        sin_polar * sin_azimuth,
        cos_polar,
        sin_polar * cos_azimuth,
    ) * radius
}

/// Manual orbit navigation with idle auto-rotate.
///
/// Times passed in are seconds on the app's elapsed clock.
#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    state: CameraState,
    settings: CameraSettings,
    auto_rotate: bool,
    dragging: bool,
    panning: bool,
    last_interaction: Option<f32>,
}

impl OrbitCameraController {
    pub fn new(settings: CameraSettings) -> Self {
        let mut controller = Self {
            state: CameraState {
                azimuth: INITIAL_AZIMUTH,
                polar: INITIAL_POLAR,
                distance: INITIAL_DISTANCE,
                target: Vec3::ZERO,
            },
            settings,
            auto_rotate: true,
            dragging: false,
            panning: false,
            last_interaction: None,
        };
        controller.state.polar = controller.clamp_polar(controller.state.polar);
        controller.state.distance = controller.clamp_distance(controller.state.distance);
        controller
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// A button is held on the viewport, either orbiting or panning.
    pub fn is_interacting(&self) -> bool {
        self.dragging || self.panning
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.auto_rotate
    }

    pub fn begin_drag(&mut self, now: f32) {
        self.dragging = true;
        self.last_interaction = Some(now);
    }

    pub fn end_drag(&mut self, now: f32) {
        self.dragging = false;
        self.last_interaction = Some(now);
    }

    /// Orbit by a pointer delta in pixels.
    pub fn apply_drag(&mut self, delta: Vec2, now: f32) {
        let sensitivity = self.settings.drag_sensitivity;
        self.state.azimuth =
            (self.state.azimuth - delta.x * sensitivity).rem_euclid(std::f32::consts::TAU);
        self.state.polar = self.clamp_polar(self.state.polar - delta.y * sensitivity);
        self.last_interaction = Some(now);
    }

    pub fn begin_pan(&mut self, now: f32) {
        self.panning = true;
        self.last_interaction = Some(now);
    }

    pub fn end_pan(&mut self, now: f32) {
        self.panning = false;
        self.last_interaction = Some(now);
    }

    /// Shift eye and target together along the view's right and up axes,
    /// faster the further out the camera is.
    pub fn apply_pan(&mut self, delta: Vec2, now: f32) {
        let speed = self.settings.pan_speed * (self.state.distance / PAN_REFERENCE_DISTANCE);
        let transform = self.transform();
        let offset = transform.right().as_vec3() * (-delta.x * speed)
            + transform.up().as_vec3() * (delta.y * speed);
        self.state.target += offset;
        self.last_interaction = Some(now);
    }

    /// Move the eye along the view ray. Positive deltas move away from the target.
    pub fn apply_zoom(&mut self, delta: f32, now: f32) {
        self.state.distance =
            self.clamp_distance(self.state.distance + delta * self.settings.zoom_speed);
        self.last_interaction = Some(now);
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// Whether idle rotation may run at `now`.
    pub fn idle_rotate_engaged(&self, now: f32) -> bool {
        self.auto_rotate
            && !self.is_interacting()
            && self
                .last_interaction
                .is_none_or(|last| now - last >= self.settings.idle_resume_secs)
    }

    /// Advance idle rotation. Returns `true` if the camera moved.
    pub fn tick(&mut self, dt: f32, now: f32) -> bool {
        if !self.idle_rotate_engaged(now) {
            return false;
        }

        self.state.azimuth = (self.state.azimuth + self.settings.auto_rotate_speed * dt)
            .rem_euclid(std::f32::consts::TAU);
        true
    }

    /// Fit `region` into view, keeping the current orbit angles.
    ///
    /// A degenerate region keeps its center as target and uses the fallback
    /// distance; the error is still returned so callers can report it.
    pub fn frame(
        &mut self,
        region: &BoundingRegion,
        fit_offset_ratio: f32,
    ) -> Result<(), RegionError> {
        match region.bounding_sphere() {
            Ok((center, radius)) => {
                let half_fov = self.settings.fov_radians() * 0.5;
                let distance = fit_offset_ratio * (radius / half_fov.tan());
                self.focus(center, distance);
                Ok(())
            }
            Err(error) => {
                let center = region.center();
                let target = if center.is_finite() {
                    center
                } else {
                    self.state.target
                };
                self.focus(target, self.settings.fallback_distance);
                Err(error)
            }
        }
    }

    pub fn focus(&mut self, target: Vec3, distance: f32) {
        self.state.target = target;
        self.state.distance = self.clamp_distance(distance);
    }

    /// Place the eye at `position` looking at `target`, within the usual limits.
    pub fn set_pose(&mut self, position: Vec3, target: Vec3) {
        let offset = position - target;
        let distance = offset.length();

        self.state.target = target;
        if distance > f32::EPSILON {
            self.state.polar = self.clamp_polar((offset.y / distance).clamp(-1.0, 1.0).acos());
            self.state.azimuth = offset.x.atan2(offset.z).rem_euclid(std::f32::consts::TAU);
        }
        self.state.distance = self.clamp_distance(distance);
    }

    pub fn position(&self) -> Vec3 {
        self.state.position()
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.state.target, Vec3::Y)
    }

    /// World-space ray through a cursor position given in logical pixels from
    /// the top-left corner of a viewport of `viewport` size.
    pub fn screen_ray(&self, cursor: Vec2, viewport: Vec2) -> Option<Ray3d> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let ndc = Vec2::new(
            2.0 * cursor.x / viewport.x - 1.0,
            1.0 - 2.0 * cursor.y / viewport.y,
        );

        let transform = self.transform();
        let forward = transform.forward().as_vec3();
        let right = transform.right().as_vec3();
        let up = transform.up().as_vec3();

        let tan_half_fov = (self.settings.fov_radians() * 0.5).tan();
        let aspect = viewport.x / viewport.y;
        let direction =
            forward + right * (ndc.x * tan_half_fov * aspect) + up * (ndc.y * tan_half_fov);

        Some(Ray3d {
            origin: transform.translation,
            direction: Dir3::new(direction).ok()?,
        })
    }

    fn clamp_polar(&self, polar: f32) -> f32 {
        let epsilon = self.settings.polar_epsilon;
        polar.clamp(epsilon, std::f32::consts::PI - epsilon)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.settings.min_distance, self.settings.max_distance)
    }
}
