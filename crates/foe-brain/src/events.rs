//! Messages between agents and the squad coordinator.

use foe_core::{AgentId, Vec2};

use crate::AgentState;

/// Published by an agent, drained by the coordinator once per cycle.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SquadEvent {
    /// Join the roster (idempotent).
    Add(AgentId),
    /// Leave the roster.
    Remove(AgentId),
    /// `reporter` has located the target; alert allies it can see.
    Found { reporter: AgentId },
}

impl SquadEvent {
    pub fn agent(&self) -> AgentId {
        match *self {
            SquadEvent::Add(a) | SquadEvent::Remove(a) => a,
            SquadEvent::Found { reporter } => reporter,
        }
    }
}

/// Sent by the coordinator, applied by the receiving agent.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Directive {
    /// Close in: approach on, strafe and evade off.
    Attack(AgentId),
    /// Hold distance: strafe and evade on, approach off.
    Strafe(AgentId),
    /// Reverse strafe handedness.
    FlipStrafe(AgentId),
    /// Enter ALERT immediately, treating `target_position` as last known.
    ForceAlert { agent: AgentId, target_position: Vec2 },
}

impl Directive {
    pub fn agent(&self) -> AgentId {
        match *self {
            Directive::Attack(a) | Directive::Strafe(a) | Directive::FlipStrafe(a) => a,
            Directive::ForceAlert { agent, .. } => agent,
        }
    }
}

/// A state change, recorded for observers.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    pub agent: AgentId,
    pub from:  AgentState,
    pub to:    AgentState,
}
