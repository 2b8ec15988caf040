//! `foe-squad` — squad-level tactics.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`coordinator`] | `TacticalCoordinator`, `SquadContext`, `MemberSnapshot`    |
//! | [`roster`]      | `Roster` — insertion-ordered set of agents in battle       |
//! | [`config`]      | `SquadConfig`                                              |
//! | [`error`]       | `SquadError`, `SquadResult<T>`                             |
//!
//! # Cycle
//!
//! ```text
//! drain inbox in order:
//!   ADD(a)      → roster.add(a)        (no-op if present)
//!   REMOVE(a)   → roster.remove(a)
//!   FOUND(r)    → ForceAlert every non-attacking ally within found_radius
//!                 of r with a clear sight line (R-tree radius query)
//! if tick % broadcast_interval_ticks == 0:
//!   for a in roster (join order), a in ALERT:
//!     chance(strafe_flip_chance)                     → FlipStrafe(a)
//!     ready && (behind target || chance(frontal))    → Attack(a)
//!     otherwise                                      → Strafe(a)
//! ```
//!
//! The coordinator never owns agents; it sees them through per-cycle
//! [`MemberSnapshot`]s and answers with [`foe_brain::Directive`]s the caller
//! routes back.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod roster;


pub use config::SquadConfig;
pub use coordinator::{MemberSnapshot, SquadContext, TacticalCoordinator};
pub use error::{SquadError, SquadResult};
pub use roster::Roster;
