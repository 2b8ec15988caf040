//! `foe-sim` — fixed-step orchestrator for the foe enemy-AI framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Agents     — AgentController::tick, ascending AgentId
//!                  (perception → state update → steering force)
//!   ② Integrate  — Body::integrate + PhysicsWorld::sync_body
//!                  (skipped when config.integrate_bodies is false)
//!   ③ Squad      — coordinator drains SquadEvents, answers FOUND, and on
//!                  its cadence broadcasts Attack / Strafe / FlipStrafe
//!   ④ Directives — AgentController::apply_directive, in production order
//!   ⑤ Observer   — on_transition, on_directive, on_tick_end
//! ```
//!
//! Everything runs on the calling thread; the same seed and inputs always
//! produce the same run.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use foe_core::{Arena, Body, SimConfig, TargetState, Vec2};
//! use foe_nav::{AStarPlanner, GridConfig, NavGridBuilder};
//! use foe_sim::{AgentSpawn, NoopObserver, SimBuilder};
//!
//! let grid = NavGridBuilder::new(GridConfig::new(Vec2::ZERO, 32, 32, 1.0))
//!     .rasterize(&arena)
//!     .build()?;
//! let mut sim = SimBuilder::new(SimConfig::default(), arena, grid, AStarPlanner)
//!     .target(TargetState::new(player, Vec2::new(20.0, 20.0)))
//!     .agent(AgentSpawn::new(body, patrol))
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::{AgentSpawn, SimBuilder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimLog, SimObserver};
pub use sim::Sim;
