//! `foe-brain` — one enemy agent's decision loop.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`agent`]   | `AgentController`, `AgentView`                                   |
//! | `machine`   | enter/update/exit handler table, one row per `AgentState`        |
//! | [`state`]   | `AgentState`, `AnimationHint`                                    |
//! | [`context`] | `TickContext` — borrowed world view plus output queues           |
//! | [`events`]  | `SquadEvent` (agent → coordinator), `Directive` (coordinator → agent), `Transition` |
//! | [`attack`]  | `AttackController` trait, `TimedAttack`                          |
//! | [`patrol`]  | `PatrolRoute`                                                    |
//! | [`config`]  | `BrainConfig`                                                    |
//! | [`error`]   | `BrainError`, `BrainResult<T>`                                   |
//!
//! # Tick model
//!
//! ```text
//! perception.detect (TTL-cached)
//!   → attack.update(dt)
//!   → animation overlay
//!   → handlers[state].update  ──► Some(next): exit(old) · enter(next)
//!   → steering output applied to the body as a force
//! ```
//!
//! Transitions are immediate and unconditional.  Handlers reach into the
//! controller's fields directly; only `AgentController` is public.
//!
//! Out of combat the agent follows an A* path through a small seek +
//! separation context-steering tree.  Inside `strafe_distance` of a visible
//! target in ALERT it switches to the battle tree (approach, strafe, evade,
//! avoid, separation) whose toggles the squad coordinator drives through
//! [`Directive`]s.

pub mod agent;
pub mod attack;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
mod machine;
pub mod patrol;
pub mod state;


pub use agent::{AgentController, AgentView};
pub use attack::{AttackController, TimedAttack};
pub use config::BrainConfig;
pub use context::TickContext;
pub use error::{BrainError, BrainResult};
pub use events::{Directive, SquadEvent, Transition};
pub use patrol::PatrolRoute;
pub use state::{AgentState, AnimationHint};
