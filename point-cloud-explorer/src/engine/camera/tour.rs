use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use constants::tour::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::engine::camera::orbit_camera::spherical_offset;

/// Tour cadence and viewpoint sampling ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    pub change_interval_secs: f32,
    pub transition_secs: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Fixed RNG seed for reproducible tours. Seeded from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            change_interval_secs: CHANGE_INTERVAL_SECS,
            transition_secs: TRANSITION_SECS,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            seed: None,
        }
    }
}

/// Descriptive tag shown alongside a tour viewpoint. Has no effect on geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerspectiveLabel {
    Top,
    Bottom,
    Front,
    Back,
    Left,
    Right,
    DiagonalUp,
    DiagonalDown,
    Wide,
    Detail,
}

impl PerspectiveLabel {
    pub const ALL: [Self; 10] = [
        Self::Top,
        Self::Bottom,
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::DiagonalUp,
        Self::DiagonalDown,
        Self::Wide,
        Self::Detail,
    ];

    /// Convert label to the identifier sent to the frontend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::DiagonalUp => "diagonal-up",
            Self::DiagonalDown => "diagonal-down",
            Self::Wide => "wide",
            Self::Detail => "detail",
        }
    }
}

/// Eye position and look-target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub start: Viewpoint,
    pub end: Viewpoint,
    pub started_at: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TourPhase {
    #[default]
    Idle,
    Holding,
    Transitioning(Transition),
}

/// Cubic ease-out on a progress clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f32) -> f32 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Random viewpoint on a sphere around `center`, looking at `center`.
///
/// Angles are drawn uniformly, which favours the poles over an area-uniform
/// distribution.
pub fn sample_viewpoint<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec3,
    min_radius: f32,
    max_radius: f32,
) -> Viewpoint {
    let radius = rng.gen_range(min_radius..=max_radius);
    let polar = rng.gen_range(0.0..=PI);
    let azimuth = rng.gen_range(0.0..TAU);

    Viewpoint {
        position: center + spherical_offset(azimuth, polar, radius),
        target: center,
    }
}

/// Scripted camera tour: holds, then eases to a freshly sampled viewpoint.
///
/// The director never touches the camera. [`TourDirector::advance`] returns
/// the pose to apply and the caller writes it into the orbit controller.
#[derive(Debug, Clone)]
pub struct TourDirector {
    phase: TourPhase,
    settings: TourSettings,
    subject_center: Vec3,
    next_change_at: f32,
    perspective_label: Option<PerspectiveLabel>,
    explored_item: Option<usize>,
    rng: ChaCha8Rng,
}

impl TourDirector {
    pub fn new(settings: TourSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            phase: TourPhase::Idle,
            settings,
            subject_center: Vec3::ZERO,
            next_change_at: 0.0,
            perspective_label: None,
            explored_item: None,
            rng,
        }
    }

    pub fn phase(&self) -> &TourPhase {
        &self.phase
    }

    pub fn settings(&self) -> &TourSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.phase, TourPhase::Idle)
    }

    pub fn perspective_label(&self) -> Option<PerspectiveLabel> {
        self.perspective_label
    }

    /// Dataset index surfaced by the latest viewpoint change.
    pub fn explored_item(&self) -> Option<usize> {
        self.explored_item
    }

    /// Enter the tour around `subject_center`. The first change is due at `now`.
    pub fn start(&mut self, now: f32, subject_center: Vec3) {
        self.subject_center = subject_center;
        self.next_change_at = now;
        self.phase = TourPhase::Holding;
        info!("[TOUR] started around {:?}", subject_center);
    }

    /// Leave the tour, dropping any transition in progress.
    /// Returns `false` if the tour was already idle.
    pub fn stop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }

        self.phase = TourPhase::Idle;
        self.explored_item = None;
        self.perspective_label = None;
        info!("[TOUR] stopped");
        true
    }

    /// Advance the schedule to `now`.
    ///
    /// `current` is the camera pose used as the start of a new transition and
    /// `item_count` bounds the explored item. Returns the pose to apply, or
    /// `None` while idle or holding.
    pub fn advance(&mut self, now: f32, current: Viewpoint, item_count: usize) -> Option<Viewpoint> {
        if matches!(self.phase, TourPhase::Holding) && now >= self.next_change_at {
            self.begin_transition(now, current, item_count);
        }

        let TourPhase::Transitioning(transition) = self.phase else {
            return None;
        };

        let duration = self.settings.transition_secs;
        let progress = if duration > 0.0 {
            ((now - transition.started_at) / duration).clamp(0.0, 1.0)
        } else {
            1.0
        };

        if progress >= 1.0 {
            self.phase = TourPhase::Holding;
            self.next_change_at = now + self.settings.change_interval_secs;
            return Some(transition.end);
        }

        let eased = ease_out_cubic(progress);
        Some(Viewpoint {
            position: transition.start.position.lerp(transition.end.position, eased),
            target: transition.start.target.lerp(transition.end.target, eased),
        })
    }

    fn begin_transition(&mut self, now: f32, current: Viewpoint, item_count: usize) {
        let end = sample_viewpoint(
            &mut self.rng,
            self.subject_center,
            self.settings.min_radius,
            self.settings.max_radius,
        );

        let label = PerspectiveLabel::ALL[self.rng.gen_range(0..PerspectiveLabel::ALL.len())];
        self.perspective_label = Some(label);
        self.explored_item = (item_count > 0).then(|| self.rng.gen_range(0..item_count));

        debug!(
            "[TOUR] moving to {} view at {:?}",
            label.as_str(),
            end.position
        );

        self.phase = TourPhase::Transitioning(Transition {
            start: current,
            end,
            started_at: now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_director() -> TourDirector {
        TourDirector::new(TourSettings {
            seed: Some(7),
            ..TourSettings::default()
        })
    }

    fn origin_view() -> Viewpoint {
        Viewpoint {
            position: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Easing
    // ------------------------------------------------------------------

    #[test]
    fn easing_has_exact_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);
    }

    #[test]
    fn easing_is_monotone_without_overshoot() {
        let mut previous = 0.0;
        for step in 0..=1000 {
            let value = ease_out_cubic(step as f32 / 1000.0);
            assert!(value >= previous);
            assert!((0.0..=1.0).contains(&value));
            previous = value;
        }
    }

    // ------------------------------------------------------------------
    // Sampling
    // ------------------------------------------------------------------

    #[test]
    fn sampled_viewpoints_stay_within_radius_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let view = sample_viewpoint(&mut rng, Vec3::ZERO, 8.0, 25.0);
            let radius = view.position.length();
            assert!((8.0 - 1e-3..=25.0 + 1e-3).contains(&radius), "radius {radius}");
            assert_eq!(view.target, Vec3::ZERO);
        }
    }

    #[test]
    fn sampled_viewpoints_orbit_subject_center() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let center = Vec3::new(10.0, -4.0, 2.0);
        for _ in 0..100 {
            let view = sample_viewpoint(&mut rng, center, 8.0, 25.0);
            let radius = view.position.distance(center);
            assert!((8.0 - 1e-3..=25.0 + 1e-3).contains(&radius));
            assert_eq!(view.target, center);
        }
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    #[test]
    fn idle_director_does_nothing() {
        let mut director = seeded_director();
        assert!(director.advance(100.0, origin_view(), 10).is_none());
        assert!(!director.is_active());
    }

    #[test]
    fn first_transition_starts_immediately() {
        let mut director = seeded_director();
        director.start(2.0, Vec3::ZERO);

        let pose = director.advance(2.0, origin_view(), 10).unwrap();

        assert!(matches!(director.phase(), TourPhase::Transitioning(_)));
        assert_eq!(pose, origin_view());
        assert!(director.perspective_label().is_some());
        assert!(director.explored_item().is_some_and(|i| i < 10));
    }

    #[test]
    fn transition_ends_exactly_on_sampled_viewpoint() {
        let mut director = seeded_director();
        director.start(0.0, Vec3::ZERO);
        director.advance(0.0, origin_view(), 5);

        let TourPhase::Transitioning(transition) = *director.phase() else {
            panic!("expected a transition");
        };

        let midway = director.advance(1.5, origin_view(), 5).unwrap();
        assert_ne!(midway, transition.end);

        let end = director.advance(3.0, origin_view(), 5).unwrap();
        assert_eq!(end, transition.end);
        assert_eq!(*director.phase(), TourPhase::Holding);
    }

    #[test]
    fn holding_waits_for_change_interval() {
        let mut director = seeded_director();
        director.start(0.0, Vec3::ZERO);
        director.advance(0.0, origin_view(), 5);
        director.advance(3.0, origin_view(), 5);

        assert!(director.advance(4.0, origin_view(), 5).is_none());
        assert!(director.advance(7.9, origin_view(), 5).is_none());
        assert!(director.advance(8.0, origin_view(), 5).is_some());
        assert!(matches!(director.phase(), TourPhase::Transitioning(_)));
    }

    #[test]
    fn empty_dataset_surfaces_no_item() {
        let mut director = seeded_director();
        director.start(0.0, Vec3::ZERO);
        director.advance(0.0, origin_view(), 0);
        assert!(director.explored_item().is_none());
    }

    #[test]
    fn stop_clears_transition_and_explored_item() {
        let mut director = seeded_director();
        director.start(0.0, Vec3::ZERO);
        director.advance(0.5, origin_view(), 5);

        assert!(director.stop());
        assert_eq!(*director.phase(), TourPhase::Idle);
        assert!(director.explored_item().is_none());
        assert!(!director.stop());
    }

    #[test]
    fn seeded_tours_are_reproducible() {
        let mut a = seeded_director();
        let mut b = seeded_director();
        a.start(0.0, Vec3::ZERO);
        b.start(0.0, Vec3::ZERO);

        a.advance(0.0, origin_view(), 50);
        b.advance(0.0, origin_view(), 50);

        assert_eq!(a.phase(), b.phase());
        assert_eq!(a.explored_item(), b.explored_item());
    }
}
