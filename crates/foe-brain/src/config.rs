//! Brain configuration.

use foe_perception::PerceptionConfig;
use foe_steering::SteeringConfig;

use crate::{BrainError, BrainResult};

/// Everything one agent's controller is tuned by.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrainConfig {
    pub steering:   SteeringConfig,
    pub perception: PerceptionConfig,

    // ── Patrol / look-around ──────────────────────────────────────────────
    /// Probability of a look-around on reaching a patrol waypoint.
    pub look_around_chance: f32,
    /// Half-width of the look-around sweep.
    pub look_sweep_deg:     f32,
    /// Seconds per sweep phase (three phases).
    pub look_phase_secs:    f32,

    // ── Turning ───────────────────────────────────────────────────────────
    /// NOTICED hands over to INDICATOR once the facing error is below this.
    pub facing_threshold_deg: f32,
    pub turn_rate_deg:        f32,

    // ── Alertness gauge ───────────────────────────────────────────────────
    /// Floor the gauge is raised to on entering INDICATOR.
    pub gauge_initial: f32,
    /// Gauge units per second while the target is perceived.
    pub gauge_rise:    f32,
    /// Gauge units per second while it is not.
    pub gauge_fall:    f32,

    // ── Pursuit ───────────────────────────────────────────────────────────
    pub replan_interval_secs: f32,
    pub attack_range:         f32,
    /// ALERT switches to close-range context steering within this distance.
    pub strafe_distance:      f32,
    pub arrival_radius:       f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            steering:             SteeringConfig::default(),
            perception:           PerceptionConfig::default(),
            look_around_chance:   0.3,
            look_sweep_deg:       60.0,
            look_phase_secs:      1.0,
            facing_threshold_deg: 10.0,
            turn_rate_deg:        360.0,
            gauge_initial:        0.1,
            gauge_rise:           0.5,
            gauge_fall:           0.25,
            replan_interval_secs: 0.1,
            attack_range:         1.5,
            strafe_distance:      6.0,
            arrival_radius:       0.5,
        }
    }
}

impl BrainConfig {
    pub fn validate(&self) -> BrainResult<()> {
        self.steering.validate()?;
        self.perception.validate()?;
        if !(0.0..=1.0).contains(&self.look_around_chance) {
            return Err(BrainError::Config(format!(
                "look_around_chance must be in [0, 1], got {}",
                self.look_around_chance
            )));
        }
        if !(0.0..=1.0).contains(&self.gauge_initial) {
            return Err(BrainError::Config(format!(
                "gauge_initial must be in [0, 1], got {}",
                self.gauge_initial
            )));
        }
        let positive = [
            ("look_phase_secs", self.look_phase_secs),
            ("turn_rate_deg", self.turn_rate_deg),
            ("gauge_rise", self.gauge_rise),
            ("gauge_fall", self.gauge_fall),
            ("arrival_radius", self.arrival_radius),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(BrainError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.attack_range > self.strafe_distance {
            return Err(BrainError::Config(format!(
                "attack_range {} exceeds strafe_distance {}",
                self.attack_range, self.strafe_distance
            )));
        }
        Ok(())
    }
}
