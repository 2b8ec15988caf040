//! Fixed-step simulation time and explicit timers.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter.  Each tick advances
//! simulated time by a fixed step `dt_secs`:
//!
//!   sim_time = tick * dt_secs
//!
//! Nothing in the framework reads a wall clock.  Throttles (perception cache,
//! path re-planning, look-around sweeps) are [`Cooldown`]s and [`Timer`]s that
//! the owner advances with the step it was handed, so a run is reproducible
//! from its seed alone.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// `true` on every `interval`-th tick (tick 0 included).  An interval of
    /// zero never fires.
    #[inline]
    pub fn is_cadence(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Seconds of simulated time per tick.
    pub dt_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds since tick 0.  Computed in `f64` so long runs do
    /// not accumulate `f32` rounding.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        (self.current_tick.0 as f64 * self.dt_secs as f64) as f32
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level fixed-step configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Seconds per tick.  Default: 1/60.
    pub dt_secs: f32,

    /// Total ticks `Sim::run` simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Integrate agent bodies with the built-in kinematic step.  Disable when
    /// an external physics engine consumes the steering output instead.
    pub integrate_bodies: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt_secs:          1.0 / 60.0,
            total_ticks:      3_600,
            seed:             42,
            integrate_bodies: true,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt_secs)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dt_secs > 0.0 && self.dt_secs.is_finite()) {
            return Err(CoreError::Config(format!(
                "dt_secs must be positive and finite, got {}",
                self.dt_secs
            )));
        }
        Ok(())
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

/// Repeating interval throttle: fires once every `interval` seconds of
/// simulated time.
///
/// A fresh cooldown is *ready*: the first `tick` fires immediately, which is
/// what a re-planning throttle wants on state entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Cooldown {
    interval:  f32,
    remaining: f32,
}

impl Cooldown {
    pub fn new(interval: f32) -> Self {
        Self { interval: interval.max(0.0), remaining: 0.0 }
    }

    /// Advance by `dt`.  Returns `true` (and re-arms) when the interval has
    /// elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }

    /// Make the next `tick` fire regardless of elapsed time.
    #[inline]
    pub fn trigger(&mut self) {
        self.remaining = 0.0;
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

// ── Timer ─────────────────────────────────────────────────────────────────────

/// One-shot countdown.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timer {
    duration: f32,
    elapsed:  f32,
}

impl Timer {
    pub fn new(duration: f32) -> Self {
        Self { duration: duration.max(0.0), elapsed: 0.0 }
    }

    /// Restart with a new duration.
    #[inline]
    pub fn reset(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
    }

    /// Advance by `dt`.  Returns `true` once the timer has run out.
    #[inline]
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.finished()
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
