//! `foe-core` — foundational types for the `foe` enemy-AI framework.
//!
//! This crate is a dependency of every other `foe-*` crate.  It has no
//! `foe-*` dependencies and few external ones (`glam`, `rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `EdgeId`, `EntityId`                  |
//! | [`heading`]     | Slot ↔ heading conversion, angle helpers, `Handedness`     |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`, `Cooldown`, `Timer`       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)                  |
//! | [`body`]        | `Body` (kinematic transform), `TargetState`                |
//! | [`world`]       | `PhysicsWorld` trait, `RayFilter`, `RayHit`, `Aabb`        |
//! | [`arena`]       | `Arena` — in-memory box/circle world implementing the trait |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and id types.     |

pub mod arena;
pub mod body;
pub mod error;
pub mod heading;
pub mod ids;
pub mod rng;
pub mod time;
pub mod world;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use glam::Vec2;

pub use arena::Arena;
pub use body::{Body, TargetState};
pub use error::{CoreError, CoreResult};
pub use heading::Handedness;
pub use ids::{AgentId, EdgeId, EntityId, NodeId};
pub use rng::{AgentRng, SimRng};
pub use time::{Cooldown, SimClock, SimConfig, Tick, Timer};
pub use world::{Aabb, BodyKind, PhysicsWorld, RayFilter, RayHit};
