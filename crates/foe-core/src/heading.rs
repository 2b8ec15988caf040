//! Directional sampling and angle helpers.
//!
//! A context map samples `resolution` headings evenly around the agent.
//! Slot `i` maps to the heading
//!
//! ```text
//! angle = 2π · i / resolution
//! ```
//!
//! and a heading maps to a unit vector with the standard `(cos, sin)`
//! convention.  Every crate (steering, behaviors, debug drawing) goes through
//! these functions so the mapping cannot drift between call sites.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Heading in radians of context-map slot `slot`.
#[inline]
pub fn slot_to_heading(slot: usize, resolution: usize) -> f32 {
    debug_assert!(resolution > 0, "context map resolution must be non-zero");
    TAU * slot as f32 / resolution as f32
}

/// Nearest context-map slot for `heading` (radians, any range).
#[inline]
pub fn heading_to_slot(heading: f32, resolution: usize) -> usize {
    debug_assert!(resolution > 0, "context map resolution must be non-zero");
    let turns = heading.rem_euclid(TAU) / TAU;
    (turns * resolution as f32).round() as usize % resolution
}

/// Unit vector pointing along `heading`.
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    Vec2::from_angle(heading)
}

/// Heading of `v` in radians, in `(-π, π]`.  Zero vectors map to `0.0`.
#[inline]
pub fn vec_to_heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Unit direction of context-map slot `slot`.
#[inline]
pub fn slot_direction(slot: usize, resolution: usize) -> Vec2 {
    heading_to_vec(slot_to_heading(slot, resolution))
}

/// Nearest slot for an arbitrary (non-zero) direction vector.
#[inline]
pub fn direction_to_slot(dir: Vec2, resolution: usize) -> usize {
    heading_to_slot(vec_to_heading(dir), resolution)
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI { a + TAU } else { a }
}

/// Signed shortest rotation from `from` to `to`.
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Unsigned angle between heading `facing` and direction `dir`.
#[inline]
pub fn angular_deviation(facing: f32, dir: Vec2) -> f32 {
    angle_diff(facing, vec_to_heading(dir)).abs()
}

// ── Handedness ────────────────────────────────────────────────────────────────

/// Which way a perpendicular is taken when strafing around a target.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Handedness {
    /// Rotate the target direction by +90°.
    #[default]
    CounterClockwise,
    /// Rotate the target direction by −90°.
    Clockwise,
}

impl Handedness {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Handedness::CounterClockwise => Handedness::Clockwise,
            Handedness::Clockwise        => Handedness::CounterClockwise,
        }
    }

    /// `v` rotated by ±90° according to `self`.
    #[inline]
    pub fn perpendicular(self, v: Vec2) -> Vec2 {
        match self {
            Handedness::CounterClockwise => v.perp(),
            Handedness::Clockwise        => -v.perp(),
        }
    }
}
