//! `foe-nav` — obstacle grid and path planning.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `NavGrid` (CSR, 8-connected), `NavGridBuilder`, `GridConfig` |
//! | [`planner`] | `PathPlanner` trait, `Path`, `AStarPlanner`                 |
//! | [`error`]   | `NavError`, `NavResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridConfig`.           |

pub mod error;
pub mod grid;
pub mod planner;


pub use error::{NavError, NavResult};
pub use grid::{GridConfig, NavGrid, NavGridBuilder};
pub use planner::{AStarPlanner, Path, PathPlanner};
