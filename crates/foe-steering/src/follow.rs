//! `PathFollow` — seek along a waypoint list.

use foe_core::Vec2;

use crate::behavior::Limits;
use crate::steering::SteeringOutput;

/// Follows waypoints in order, advancing once within `arrival_radius`.
///
/// An empty path counts as arrived: callers treat a failed search as "hold
/// position".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathFollow {
    waypoints:      Vec<Vec2>,
    cursor:         usize,
    arrival_radius: f32,
}

impl PathFollow {
    pub fn new(arrival_radius: f32) -> Self {
        Self { waypoints: Vec::new(), cursor: 0, arrival_radius }
    }

    /// Replace the path, reusing the existing allocation.
    pub fn set_path(&mut self, waypoints: &[Vec2]) {
        self.waypoints.clear();
        self.waypoints.extend_from_slice(waypoints);
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.cursor = 0;
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Waypoint currently steered toward.
    pub fn current(&self) -> Option<Vec2> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Final waypoint of the path.
    pub fn destination(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    #[inline]
    pub fn arrived(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    /// Skip every waypoint within `arrival_radius` of `position` and return
    /// the one to head for next.
    pub fn advance(&mut self, position: Vec2) -> Option<Vec2> {
        while let Some(wp) = self.current() {
            if position.distance(wp) > self.arrival_radius {
                return Some(wp);
            }
            self.cursor += 1;
        }
        None
    }

    /// `advance`, then seek the next waypoint at full acceleration.  Zero
    /// output once arrived.
    pub fn steer(&mut self, position: Vec2, limits: Limits) -> SteeringOutput {
        match self.advance(position) {
            Some(wp) => {
                let dir = (wp - position).normalize_or_zero();
                SteeringOutput::linear(dir * limits.max_acceleration)
            }
            None => SteeringOutput::ZERO,
        }
    }
}
