use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::orbit_camera::CameraSettings;
use crate::engine::camera::tour::TourSettings;
use crate::engine::error::ConfigError;
use crate::engine::picking::proxy_index::PickingSettings;

/// Runtime configuration. Starts from the shared constants and may be
/// replaced by the `config` section of the scene manifest.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub camera: CameraSettings,
    pub tour: TourSettings,
    pub picking: PickingSettings,
}

impl ExplorerConfig {
    /// Reject values the camera, tour or picking code cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        positive("camera.min_distance", camera.min_distance)?;
        ordered(
            "camera.min_distance",
            camera.min_distance,
            "camera.max_distance",
            camera.max_distance,
        )?;
        positive("camera.zoom_speed", camera.zoom_speed)?;
        positive("camera.drag_sensitivity", camera.drag_sensitivity)?;
        positive("camera.pan_speed", camera.pan_speed)?;
        positive("camera.fit_offset_ratio", camera.fit_offset_ratio)?;
        positive("camera.fallback_distance", camera.fallback_distance)?;
        non_negative("camera.auto_rotate_speed", camera.auto_rotate_speed)?;
        non_negative("camera.idle_resume_secs", camera.idle_resume_secs)?;

        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::InvalidValue {
                field: "camera.fov_degrees",
                message: format!("{} (must be within 0..180)", camera.fov_degrees),
            });
        }

        if !(camera.polar_epsilon > 0.0 && camera.polar_epsilon < std::f32::consts::FRAC_PI_2) {
            return Err(ConfigError::InvalidValue {
                field: "camera.polar_epsilon",
                message: format!("{} (must be within 0..pi/2)", camera.polar_epsilon),
            });
        }

        let tour = &self.tour;
        positive("tour.change_interval_secs", tour.change_interval_secs)?;
        positive("tour.transition_secs", tour.transition_secs)?;
        positive("tour.min_radius", tour.min_radius)?;
        ordered(
            "tour.min_radius",
            tour.min_radius,
            "tour.max_radius",
            tour.max_radius,
        )?;
        // Tour viewpoints must be reachable without the orbit clamp moving them.
        ordered(
            "camera.min_distance",
            camera.min_distance,
            "tour.min_radius",
            tour.min_radius,
        )?;
        ordered(
            "tour.max_radius",
            tour.max_radius,
            "camera.max_distance",
            camera.max_distance,
        )?;

        positive("picking.proxy_radius", self.picking.proxy_radius)?;
        non_negative(
            "picking.click_drag_threshold_px",
            self.picking.click_drag_threshold_px,
        )?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            message: format!("{value} (must be > 0)"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field,
            message: format!("{value} (must be >= 0)"),
        })
    }
}

fn ordered(
    min_field: &'static str,
    min: f32,
    max_field: &'static str,
    max: f32,
) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            min_field,
            min,
            max_field,
            max,
        })
    }
}
