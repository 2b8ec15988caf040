//! `TickContext` — everything an agent reads or appends to during a tick.

use foe_core::{AgentRng, PhysicsWorld, TargetState, Vec2};
use foe_nav::{NavGrid, PathPlanner};

use crate::{SquadEvent, Transition};

/// Borrowed view of the world for one agent's tick.
///
/// Shared state (world, grid, planner) is read-only; the two output queues
/// are appended to and drained by the caller afterwards.
pub struct TickContext<'a> {
    /// Simulated seconds since tick 0.
    pub now:         f32,
    /// Fixed step in seconds.
    pub dt:          f32,
    pub target:      &'a TargetState,
    pub world:       &'a dyn PhysicsWorld,
    pub grid:        &'a NavGrid,
    pub planner:     &'a dyn PathPlanner,
    /// Positions of every agent (the caller's own included; separation skips
    /// coincident points).
    pub neighbors:   &'a [Vec2],
    pub rng:         &'a mut AgentRng,
    pub events:      &'a mut Vec<SquadEvent>,
    pub transitions: &'a mut Vec<Transition>,
}
