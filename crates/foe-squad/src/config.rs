//! Coordinator tuning.

use crate::{SquadError, SquadResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SquadConfig {
    /// Directive broadcasts run on every `broadcast_interval_ticks`-th tick.
    pub broadcast_interval_ticks: u64,
    /// Per-member chance of reversing strafe direction each broadcast.
    pub strafe_flip_chance:       f32,
    /// Chance an attack-ready member in front of the target is sent in anyway.
    pub frontal_attack_chance:    f32,
    /// Allies within this distance of a FOUND reporter are alerted.
    pub found_radius:             f32,
    /// A member counts as behind the target when the cosine between the
    /// target's facing and the target→member direction is below this.
    pub behind_dot:               f32,
}

impl Default for SquadConfig {
    fn default() -> Self {
        Self {
            broadcast_interval_ticks: 30,
            strafe_flip_chance:       0.2,
            frontal_attack_chance:    0.3,
            found_radius:             12.0,
            behind_dot:               -0.5,
        }
    }
}

impl SquadConfig {
    pub fn validate(&self) -> SquadResult<()> {
        if self.broadcast_interval_ticks == 0 {
            return Err(SquadError::Config("broadcast_interval_ticks must be > 0".into()));
        }
        for (name, p) in [
            ("strafe_flip_chance", self.strafe_flip_chance),
            ("frontal_attack_chance", self.frontal_attack_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SquadError::Config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if !(self.found_radius > 0.0) {
            return Err(SquadError::Config(format!(
                "found_radius must be positive, got {}",
                self.found_radius
            )));
        }
        if !(-1.0..=1.0).contains(&self.behind_dot) {
            return Err(SquadError::Config(format!(
                "behind_dot must be in [-1, 1], got {}",
                self.behind_dot
            )));
        }
        Ok(())
    }
}
