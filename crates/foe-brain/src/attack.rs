//! The attack-subsystem seam.
//!
//! The brain decides *when* to attack; what an attack does (animation, hit
//! boxes, damage) belongs to the game.  [`TimedAttack`] is a stand-in that
//! models an attack as a fixed swing followed by a recovery window.

/// Combat system an agent drives from its ATTACK state.
pub trait AttackController {
    /// `true` when a new attack may begin now.
    fn can_start_new_attack(&self) -> bool;

    /// Begin an attack.  Ignored if one cannot start.
    fn initiate_attack(&mut self);

    /// `true` while an attack is in progress.
    fn is_attacking(&self) -> bool;

    /// Advance internal timers by `dt` seconds.  Called once per tick before
    /// the state update.
    fn update(&mut self, _dt: f32) {}
}

/// Swing for `duration` seconds, then recover for `cooldown` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedAttack {
    pub duration: f32,
    pub cooldown: f32,
    swing_left:   f32,
    recover_left: f32,
    strikes:      u32,
}

impl TimedAttack {
    pub fn new(duration: f32, cooldown: f32) -> Self {
        Self { duration, cooldown, swing_left: 0.0, recover_left: 0.0, strikes: 0 }
    }

    /// Attacks started so far.
    pub fn strikes(&self) -> u32 {
        self.strikes
    }
}

impl Default for TimedAttack {
    fn default() -> Self {
        Self::new(0.4, 1.0)
    }
}

impl AttackController for TimedAttack {
    fn can_start_new_attack(&self) -> bool {
        self.swing_left <= 0.0 && self.recover_left <= 0.0
    }

    fn initiate_attack(&mut self) {
        if self.can_start_new_attack() {
            self.swing_left = self.duration;
            self.recover_left = self.cooldown;
            self.strikes += 1;
        }
    }

    fn is_attacking(&self) -> bool {
        self.swing_left > 0.0
    }

    fn update(&mut self, dt: f32) {
        if self.swing_left > 0.0 {
            self.swing_left -= dt;
        } else if self.recover_left > 0.0 {
            self.recover_left -= dt;
        }
    }
}
