//! `ContextMap` — the danger/interest array pair sampled around an agent.

use foe_core::heading::{direction_to_slot, slot_direction, slot_to_heading};
use foe_core::Vec2;

use crate::{SteeringError, SteeringResult};

/// Fixed-resolution danger and interest samples, one per heading slot.
///
/// Slot `i` looks along `2π·i/resolution`.  Both arrays always hold exactly
/// `resolution` entries; the map is allocated once by its owner and then
/// cleared and refilled in place every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMap {
    resolution: usize,
    danger:     Vec<f32>,
    interest:   Vec<f32>,
}

impl ContextMap {
    /// Allocate a zeroed map.  `resolution` must be non-zero.
    pub fn new(resolution: usize) -> SteeringResult<Self> {
        if resolution == 0 {
            return Err(SteeringError::ZeroResolution);
        }
        Ok(Self {
            resolution,
            danger: vec![0.0; resolution],
            interest: vec![0.0; resolution],
        })
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[inline]
    pub fn danger(&self) -> &[f32] {
        &self.danger
    }

    #[inline]
    pub fn interest(&self) -> &[f32] {
        &self.interest
    }

    /// Slot values are writable; the length is not.
    #[inline]
    pub fn danger_mut(&mut self) -> &mut [f32] {
        &mut self.danger
    }

    #[inline]
    pub fn interest_mut(&mut self) -> &mut [f32] {
        &mut self.interest
    }

    /// Zero interest on every slot whose danger is above the minimum.  Slots
    /// tied at the minimum all stay eligible.
    pub fn mask_by_min_danger(&mut self) {
        let min_danger = self.danger.iter().copied().fold(f32::INFINITY, f32::min);
        for (interest, &danger) in self.interest.iter_mut().zip(&self.danger) {
            if danger != min_danger {
                *interest = 0.0;
            }
        }
    }

    /// Zero both arrays without reallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.danger.fill(0.0);
        self.interest.fill(0.0);
    }

    /// Heading in radians of `slot`.
    #[inline]
    pub fn heading(&self, slot: usize) -> f32 {
        slot_to_heading(slot, self.resolution)
    }

    /// Unit direction of `slot`.
    #[inline]
    pub fn direction(&self, slot: usize) -> Vec2 {
        slot_direction(slot, self.resolution)
    }

    /// Nearest slot to `dir` (must be non-zero).
    #[inline]
    pub fn slot_of(&self, dir: Vec2) -> usize {
        direction_to_slot(dir, self.resolution)
    }

    /// Write `value` into `slot` (max-merged) and raise the `spread` slots on
    /// either side to the same level, wrapping around the circle.
    pub fn raise_danger(&mut self, slot: usize, spread: usize, value: f32) {
        let n = self.resolution;
        let spread = spread.min(n / 2);
        for offset in 0..=2 * spread {
            let i = (slot + n + offset - spread) % n;
            self.danger[i] = self.danger[i].max(value);
        }
    }

    /// Fill interest with `max(0, dot(slot_dir, dir)) * weight`.
    pub fn interest_along(&mut self, dir: Vec2, weight: f32) {
        for i in 0..self.resolution {
            self.interest[i] = (self.direction(i).dot(dir) * weight).max(0.0);
        }
    }
}
