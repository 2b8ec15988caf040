//! `ContextSteering` — turns a populated map into one movement vector.

use foe_core::Vec2;

use crate::behavior::{ContextBehavior, Limits, SteeringInput};
use crate::map::ContextMap;
use crate::SteeringResult;

/// Linear and angular steering request handed to the physics side.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SteeringOutput {
    pub linear:  Vec2,
    pub angular: f32,
}

impl SteeringOutput {
    pub const ZERO: SteeringOutput = SteeringOutput { linear: Vec2::ZERO, angular: 0.0 };

    #[inline]
    pub fn linear(linear: Vec2) -> Self {
        Self { linear, angular: 0.0 }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.linear == Vec2::ZERO && self.angular == 0.0
    }
}

/// Pick a direction from `map`.
///
/// 1. Every slot whose danger equals the minimum danger stays eligible (ties
///    included).
/// 2. Interest on all other slots is zeroed, in place.
/// 3. The slot with the strictly greatest positive interest wins (first
///    occurrence on ties); its unit heading scaled by that interest is
///    returned.
///
/// Returns `Vec2::ZERO` when no eligible slot has positive interest.
pub fn decide(map: &mut ContextMap) -> Vec2 {
    map.mask_by_min_danger();

    let mut best: Option<(usize, f32)> = None;
    for (slot, &value) in map.interest().iter().enumerate() {
        if value > best.map_or(0.0, |(_, v)| v) {
            best = Some((slot, value));
        }
    }

    match best {
        Some((slot, value)) => map.direction(slot) * value,
        None => Vec2::ZERO,
    }
}

/// A behavior tree bound to the map it fills.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextSteering {
    map:  ContextMap,
    root: ContextBehavior,
    last: SteeringOutput,
}

impl ContextSteering {
    pub fn new(resolution: usize, root: ContextBehavior) -> SteeringResult<Self> {
        Ok(Self { map: ContextMap::new(resolution)?, root, last: SteeringOutput::ZERO })
    }

    /// Fill the map from the behavior tree and steer along the decision.
    ///
    /// The decided vector (length = winning interest) is scaled by the
    /// active `max_acceleration` and capped at it.  The active limits are the
    /// tree's [`ContextBehavior::effective_limits`], else the agent's own.
    pub fn steer(&mut self, input: &SteeringInput<'_>) -> SteeringOutput {
        self.root.calculate_maps(&mut self.map, input);
        let limits: Limits = self.root.effective_limits().unwrap_or(input.limits);
        let heading = decide(&mut self.map);
        let linear = (heading * limits.max_acceleration).clamp_length_max(limits.max_acceleration);
        self.last = SteeringOutput::linear(linear);
        self.last
    }

    pub fn map(&self) -> &ContextMap {
        &self.map
    }

    pub fn root(&self) -> &ContextBehavior {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut ContextBehavior {
        &mut self.root
    }

    /// Output of the most recent `steer`.
    pub fn last_output(&self) -> SteeringOutput {
        self.last
    }
}
