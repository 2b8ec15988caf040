//! Level-defined patrol loops.

use foe_core::Vec2;

/// Closed loop of patrol waypoints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatrolRoute {
    points: Vec<Vec2>,
    cursor: usize,
}

impl PatrolRoute {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points, cursor: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Waypoint currently headed for.
    pub fn current(&self) -> Option<Vec2> {
        self.points.get(self.cursor).copied()
    }

    /// Step to the next waypoint, wrapping to the first.
    pub fn advance(&mut self) -> Option<Vec2> {
        if self.points.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.points.len();
        self.current()
    }
}
