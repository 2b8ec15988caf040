//! Agent states and the animation hint derived from them.

use std::fmt;

/// Concrete state of an agent's machine.  Exactly one is active at a time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    #[default]
    Init,
    Patrol,
    LookAround,
    Noticed,
    Indicator,
    Alert,
    Attack,
}

impl AgentState {
    pub const ALL: [AgentState; 7] = [
        AgentState::Init,
        AgentState::Patrol,
        AgentState::LookAround,
        AgentState::Noticed,
        AgentState::Indicator,
        AgentState::Alert,
        AgentState::Attack,
    ];

    /// Position in the handler table.
    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AgentState::Init       => "INIT",
            AgentState::Patrol     => "PATROL",
            AgentState::LookAround => "LOOK_AROUND",
            AgentState::Noticed    => "NOTICED",
            AgentState::Indicator  => "INDICATOR",
            AgentState::Alert      => "ALERT",
            AgentState::Attack     => "ATTACK",
        }
    }

    /// States in which perception runs with boosted exposure.
    #[inline]
    pub fn is_heightened(self) -> bool {
        matches!(self, AgentState::Indicator | AgentState::Alert | AgentState::Attack)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an animation layer should play, refreshed before every state update.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum AnimationHint {
    #[default]
    Idle,
    Walk,
    Run,
    Turn,
    Attack,
}
