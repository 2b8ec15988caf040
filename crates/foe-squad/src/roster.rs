//! Insertion-ordered set of agents in battle.

use foe_core::AgentId;

/// Agents eligible for directives, in the order they joined.
///
/// Small (a handful of agents per encounter), so membership is a linear scan.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    members: Vec<AgentId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `agent`.  Returns `false` if it was already present.
    pub fn add(&mut self, agent: AgentId) -> bool {
        if self.contains(agent) {
            return false;
        }
        self.members.push(agent);
        true
    }

    /// Remove `agent`, keeping the order of the rest.  Returns `false` if it
    /// was not present.
    pub fn remove(&mut self, agent: AgentId) -> bool {
        match self.members.iter().position(|&a| a == agent) {
            Some(i) => {
                self.members.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.members.iter().copied()
    }
}
