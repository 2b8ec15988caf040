//! `foe-perception` — how an agent detects the target.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`level`]      | `DetectionLevel` (`None < Noticed < Indicator < Alert`)     |
//! | [`zone`]       | `Zone`, `ZoneKind`, `PerceptionConfig`                      |
//! | [`perception`] | `Perception` — cached, throttled detection; `Observer`      |
//! | [`error`]      | `PerceptionError`, `PerceptionResult<T>`                    |
//!
//! # Detection model
//!
//! 1. A sight ray runs from the agent to the target.  Other agents and
//!    see-through geometry do not occlude it; anything else does, and a
//!    blocked ray yields `None`.
//! 2. Zones are tested in priority order (focused, short, peripheral,
//!    hearing).  Each zone's range is interpolated by the target's exposure,
//!    boosted while the agent is already searching.
//! 3. Cone zones yield `Alert`, hearing yields `Noticed`.
//!
//! Results are cached for `ttl_secs` of simulated time.  The caller passes
//! the current time in, so the cache is deterministic.

pub mod error;
pub mod level;
pub mod perception;
pub mod zone;


pub use error::{PerceptionError, PerceptionResult};
pub use level::DetectionLevel;
pub use perception::{Observer, Perception};
pub use zone::{PerceptionConfig, Zone, ZoneKind};
