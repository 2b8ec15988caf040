//! Throttled target detection.

use foe_core::heading::angular_deviation;
use foe_core::{EntityId, PhysicsWorld, RayFilter, TargetState, Vec2};

use crate::{DetectionLevel, PerceptionConfig};

/// The sensing agent, as seen by [`Perception::detect`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Observer {
    /// Skipped by the sight ray.
    pub entity:     EntityId,
    pub position:   Vec2,
    /// Facing heading in radians.
    pub facing:     f32,
    /// Already searching or alerted: exposure is boosted.
    pub heightened: bool,
}

/// Per-agent perception state: the cached level and when it was computed.
#[derive(Clone, Debug)]
pub struct Perception {
    config:     PerceptionConfig,
    level:      DetectionLevel,
    last_eval:  Option<f32>,
    last_known: Option<Vec2>,
}

impl Perception {
    pub fn new(config: PerceptionConfig) -> Self {
        Self { config, level: DetectionLevel::None, last_eval: None, last_known: None }
    }

    pub fn config(&self) -> &PerceptionConfig {
        &self.config
    }

    /// Cached level from the most recent evaluation (or `raise`).
    #[inline]
    pub fn level(&self) -> DetectionLevel {
        self.level
    }

    /// Target position at the most recent positive detection.
    #[inline]
    pub fn last_known(&self) -> Option<Vec2> {
        self.last_known
    }

    /// Detection level at simulated time `now` (seconds).
    ///
    /// Re-evaluates only when `ttl_secs` have passed since the previous
    /// evaluation; otherwise the cached level is returned unchanged.
    pub fn detect(
        &mut self,
        now:      f32,
        observer: &Observer,
        target:   &TargetState,
        world:    &dyn PhysicsWorld,
    ) -> DetectionLevel {
        if let Some(at) = self.last_eval {
            if now - at < self.config.ttl_secs {
                return self.level;
            }
        }
        self.last_eval = Some(now);
        self.level = self.evaluate(observer, target, world);
        if self.level.is_aware() {
            self.last_known = Some(target.position);
        }
        self.level
    }

    /// Uncached classification.
    pub fn evaluate(
        &self,
        observer: &Observer,
        target:   &TargetState,
        world:    &dyn PhysicsWorld,
    ) -> DetectionLevel {
        let filter = RayFilter::sight(observer.entity);
        let visible = if target.entity.is_valid() {
            world.reaches(observer.position, target.position, target.entity, &filter)
        } else {
            world.is_clear(observer.position, target.position, &filter)
        };
        if !visible {
            return DetectionLevel::None;
        }

        let offset = target.position - observer.position;
        let distance = offset.length();
        let deviation = if distance > 1e-6 { angular_deviation(observer.facing, offset) } else { 0.0 };
        let exposure = self.exposure(target.stealth, observer.heightened);

        self.config
            .zones
            .iter()
            .find(|z| z.contains(distance, deviation, exposure))
            .map_or(DetectionLevel::None, |z| z.kind.level())
    }

    /// Effective exposure after the heightened-awareness boost.
    #[inline]
    pub fn exposure(&self, stealth: f32, heightened: bool) -> f32 {
        let boosted = if heightened { stealth * self.config.alert_stealth_boost } else { stealth };
        boosted.clamp(0.0, 1.0)
    }

    /// Raise the cached level to at least `level` without re-evaluating.
    /// Never lowers it.
    pub fn raise(&mut self, level: DetectionLevel, at: Vec2) {
        if level > self.level {
            self.level = level;
        }
        if level.is_aware() {
            self.last_known = Some(at);
        }
    }

    /// Force the next `detect` call to re-evaluate.
    pub fn invalidate(&mut self) {
        self.last_eval = None;
    }

    /// Forget everything, as after losing the target for good.
    pub fn reset(&mut self) {
        self.level = DetectionLevel::None;
        self.last_eval = None;
        self.last_known = None;
    }
}
