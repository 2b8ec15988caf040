//! Kinematic body and target state.
//!
//! `Body` is the transform-access surface the AI drives: it exposes the
//! position/orientation queries and the velocity/force/torque mutations a
//! physics engine would.  When no engine is attached the sim integrates it
//! with a simple damped fixed step.

use glam::Vec2;

use crate::heading::{angle_diff, heading_to_vec, vec_to_heading};
use crate::EntityId;

/// Transform and motion limits of one agent.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    /// Physics-world handle, used to ignore the agent's own shape in raycasts.
    pub entity: EntityId,
    pub position: Vec2,
    /// Facing heading in radians.
    pub orientation: f32,
    pub linear_velocity: Vec2,
    pub angular_velocity: f32,
    pub max_speed: f32,
    pub max_acceleration: f32,
    /// Radians per second.
    pub max_turn_rate: f32,
    /// Fraction of velocity shed per second when no force is applied.
    pub linear_damping: f32,
    /// Force accumulated since the last `integrate`.
    force: Vec2,
}

impl Body {
    pub fn new(entity: EntityId, position: Vec2, orientation: f32) -> Self {
        Self {
            entity,
            position,
            orientation,
            linear_velocity:  Vec2::ZERO,
            angular_velocity: 0.0,
            max_speed:        3.0,
            max_acceleration: 12.0,
            max_turn_rate:    std::f32::consts::TAU,
            linear_damping:   4.0,
            force:            Vec2::ZERO,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    /// Unit vector along the current facing.
    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_to_vec(self.orientation)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Overwrite linear velocity (clamped to `max_speed`).
    pub fn set_linear_velocity(&mut self, v: Vec2) {
        self.linear_velocity = v.clamp_length_max(self.max_speed);
    }

    /// Accumulate a force (unit mass) for the next integration step.
    pub fn apply_force(&mut self, f: Vec2) {
        self.force += f;
    }

    pub fn apply_torque(&mut self, torque: f32) {
        self.angular_velocity += torque;
    }

    /// Zero all motion, dropping any accumulated force.
    pub fn halt(&mut self) {
        self.linear_velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self.force = Vec2::ZERO;
    }

    /// Rotate toward `heading` by at most `max_turn_rate * dt`.  Returns the
    /// absolute facing error remaining after the step.
    pub fn turn_towards(&mut self, heading: f32, dt: f32) -> f32 {
        let diff = angle_diff(self.orientation, heading);
        let step = self.max_turn_rate * dt;
        if diff.abs() <= step {
            self.orientation = heading;
            0.0
        } else {
            self.orientation += step.copysign(diff);
            (diff.abs() - step).max(0.0)
        }
    }

    /// `turn_towards` the heading of `point`.  No-op when standing on it.
    pub fn face_point(&mut self, point: Vec2, dt: f32) -> f32 {
        let to = point - self.position;
        if to.length_squared() < 1e-8 {
            return 0.0;
        }
        self.turn_towards(vec_to_heading(to), dt)
    }

    /// Damped semi-implicit Euler step.
    pub fn integrate(&mut self, dt: f32) {
        let accel = self.force.clamp_length_max(self.max_acceleration);
        let damping = (1.0 - self.linear_damping * dt).max(0.0);
        self.linear_velocity = (self.linear_velocity * damping + accel * dt)
            .clamp_length_max(self.max_speed);
        self.position += self.linear_velocity * dt;
        self.orientation += self.angular_velocity * dt;
        self.angular_velocity = 0.0;
        self.force = Vec2::ZERO;
    }
}

// ── TargetState ───────────────────────────────────────────────────────────────

/// What the AI knows about the target (the player) this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetState {
    pub entity: EntityId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Facing heading in radians; used for "behind the target" checks.
    pub orientation: f32,
    /// Exposure in `[0, 1]`: 0 is fully hidden, 1 fully exposed.  Detection
    /// ranges grow with this value.
    pub stealth: f32,
}

impl TargetState {
    pub fn new(entity: EntityId, position: Vec2) -> Self {
        Self {
            entity,
            position,
            velocity:    Vec2::ZERO,
            orientation: 0.0,
            stealth:     1.0,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec2 {
        heading_to_vec(self.orientation)
    }

    /// `true` if `point` lies behind the target: the cosine between the
    /// target's facing and the target→point direction is below `max_dot`.
    pub fn is_behind(&self, point: Vec2, max_dot: f32) -> bool {
        let to = (point - self.position).normalize_or_zero();
        to != Vec2::ZERO && self.forward().dot(to) < max_dot
    }
}
