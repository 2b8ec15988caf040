//! Steering configuration.

use foe_core::Handedness;

use crate::{SteeringError, SteeringResult};

/// Tuning for the context behaviors an agent assembles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringConfig {
    /// Slot count of the out-of-combat map.
    pub resolution: usize,
    /// Slot count of the close-range combat map.
    pub battle_resolution: usize,
    /// Length of the per-slot obstacle feeler, in world units.
    pub avoid_ray_length: f32,
    /// Slots on either side of a blocked slot that also receive danger.
    pub avoid_spread: usize,
    /// Agents closer than this push danger onto the slot facing them.
    pub separation_radius: f32,
    pub separation_spread: usize,
    /// Distance below which evade interest saturates at 1.
    pub evade_radius: f32,
    /// Initial strafe direction around the target.
    pub strafe_handedness: Handedness,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            resolution:        8,
            battle_resolution: 30,
            avoid_ray_length:  1.5,
            avoid_spread:      2,
            separation_radius: 1.5,
            separation_spread: 1,
            evade_radius:      4.0,
            strafe_handedness: Handedness::CounterClockwise,
        }
    }
}

impl SteeringConfig {
    pub fn validate(&self) -> SteeringResult<()> {
        if self.resolution == 0 || self.battle_resolution == 0 {
            return Err(SteeringError::ZeroResolution);
        }
        if !(self.avoid_ray_length > 0.0) {
            return Err(SteeringError::Config(format!(
                "avoid_ray_length must be positive, got {}",
                self.avoid_ray_length
            )));
        }
        if self.separation_radius < 0.0 || self.evade_radius < 0.0 {
            return Err(SteeringError::Config(
                "separation_radius and evade_radius must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
