//! `foe-steering` — context-based steering.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`map`]      | `ContextMap` — danger/interest arrays indexed by heading slot     |
//! | [`behavior`] | `ContextBehavior`, `BehaviorKind`, `SteeringInput`, `Limits`      |
//! | [`combiner`] | `Combiner` — order-independent per-slot max-merge                 |
//! | [`steering`] | `decide`, `ContextSteering`, `SteeringOutput`                     |
//! | [`follow`]   | `PathFollow` — waypoint seeking for out-of-combat movement        |
//! | [`config`]   | `SteeringConfig`                                                  |
//! | [`error`]    | `SteeringError`, `SteeringResult<T>`                              |
//!
//! # Design notes
//!
//! Each agent owns one `ContextSteering` per steering mode.  Every tick:
//!
//! 1. The behavior tree fills the map in place (no allocation after the
//!    first tick; combiner scratch buffers are reused).
//! 2. [`decide`] masks every slot above the minimum danger and picks the
//!    slot with the greatest remaining interest.
//!
//! Squad directives reach steering only through
//! [`ContextBehavior::set_enabled`] and [`ContextBehavior::flip_handedness`].

pub mod behavior;
pub mod combiner;
pub mod config;
pub mod error;
pub mod follow;
pub mod map;
pub mod steering;

#[cfg(test)]
mod tests;

pub use behavior::{BehaviorKind, BehaviorTag, ContextBehavior, Limits, SteeringInput};
pub use combiner::Combiner;
pub use config::SteeringConfig;
pub use error::{SteeringError, SteeringResult};
pub use follow::PathFollow;
pub use map::ContextMap;
pub use steering::{decide, ContextSteering, SteeringOutput};
