//! Procedural point animation.
//!
//! The point shader and the pick proxies both read the phase from
//! [`clock::AnimationClock`] and apply the motion in [`displacement`].

/// Per-frame animation phase resource.
pub mod clock;

/// Pure displacement function mirrored by the point shader.
pub mod displacement;
