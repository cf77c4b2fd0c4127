use bevy::prelude::*;

use crate::engine::assets::bounds::BoundingRegion;
use crate::engine::camera::orbit_camera::OrbitCameraController;
use crate::engine::camera::tour::{TourDirector, Viewpoint};
use crate::engine::core::config::ExplorerConfig;
use crate::engine::error::RegionError;

/// Marker for the explorer's 3D camera entity.
#[derive(Component)]
pub struct ExplorerCamera;

/// Single owner of the orbit controller and the tour director.
///
/// Every manual input goes through the rig, which cancels an active tour
/// before applying the input, so the two never drive the camera together.
#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    controller: OrbitCameraController,
    tour: TourDirector,
    subject: Option<BoundingRegion>,
}

impl CameraRig {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            controller: OrbitCameraController::new(config.camera.clone()),
            tour: TourDirector::new(config.tour.clone()),
            subject: None,
        }
    }

    pub fn controller(&self) -> &OrbitCameraController {
        &self.controller
    }

    pub fn tour(&self) -> &TourDirector {
        &self.tour
    }

    /// Record the subject region and frame it.
    pub fn set_subject(&mut self, region: BoundingRegion) -> Result<(), RegionError> {
        self.subject = Some(region);
        self.frame_subject()
    }

    pub fn frame_subject(&mut self) -> Result<(), RegionError> {
        let Some(region) = self.subject else {
            return Ok(());
        };
        let fit = self.controller.settings().fit_offset_ratio;
        self.controller.frame(&region, fit)
    }

    pub fn is_interacting(&self) -> bool {
        self.controller.is_interacting()
    }

    pub fn begin_drag(&mut self, now: f32) {
        self.stop_tour();
        self.controller.begin_drag(now);
    }

    pub fn drag(&mut self, delta: Vec2, now: f32) {
        self.stop_tour();
        self.controller.apply_drag(delta, now);
    }

    pub fn end_drag(&mut self, now: f32) {
        self.controller.end_drag(now);
    }

    pub fn begin_pan(&mut self, now: f32) {
        self.stop_tour();
        self.controller.begin_pan(now);
    }

    pub fn pan(&mut self, delta: Vec2, now: f32) {
        self.stop_tour();
        self.controller.apply_pan(delta, now);
    }

    pub fn end_pan(&mut self, now: f32) {
        self.controller.end_pan(now);
    }

    pub fn zoom(&mut self, delta: f32, now: f32) {
        self.stop_tour();
        self.controller.apply_zoom(delta, now);
    }

    /// Stop any tour and frame the subject again.
    pub fn reset_view(&mut self) -> Result<(), RegionError> {
        self.stop_tour();
        self.frame_subject()
    }

    /// Stop any tour and frame `region` at `scale` times its largest extent.
    pub fn focus_region(&mut self, region: &BoundingRegion, scale: f32) -> Result<(), RegionError> {
        self.stop_tour();
        match region.bounding_sphere() {
            Ok((center, _)) => {
                self.controller.focus(center, region.size().max_element() * scale);
                Ok(())
            }
            Err(_) => {
                let fit = self.controller.settings().fit_offset_ratio;
                self.controller.frame(region, fit)
            }
        }
    }

    /// Start the tour unless a drag or pan is in progress. Returns whether it started.
    pub fn start_tour(&mut self, now: f32) -> bool {
        if self.tour.is_active() || self.controller.is_interacting() {
            return false;
        }

        let center = self
            .subject
            .map(|region| region.center())
            .unwrap_or(self.controller.state().target);
        self.controller.set_auto_rotate(false);
        self.tour.start(now, center);
        true
    }

    /// Stop the tour and hand control back to idle rotation.
    pub fn stop_tour(&mut self) -> bool {
        if !self.tour.stop() {
            return false;
        }
        self.controller.set_auto_rotate(true);
        true
    }

    /// Returns whether the tour is active afterwards.
    pub fn toggle_tour(&mut self, now: f32) -> bool {
        if self.tour.is_active() {
            self.stop_tour();
        } else {
            self.start_tour(now);
        }
        self.tour.is_active()
    }

    /// Per-frame update: the tour drives the camera while active, otherwise
    /// idle rotation may.
    pub fn tick(&mut self, dt: f32, now: f32, item_count: usize) {
        if self.tour.is_active() {
            let current = Viewpoint {
                position: self.controller.position(),
                target: self.controller.state().target,
            };
            if let Some(pose) = self.tour.advance(now, current, item_count) {
                self.controller.set_pose(pose.position, pose.target);
            }
        } else {
            self.controller.tick(dt, now);
        }
    }
}
