//! Navigation error type.

use thiserror::Error;

use foe_core::Vec2;

/// Errors produced by `foe-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    /// The search exhausted the reachable graph.  Callers hold position.
    #[error("no path from {from} to {to}")]
    NoPath { from: Vec2, to: Vec2 },

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid configuration error: {0}")]
    Config(String),
}

pub type NavResult<T> = Result<T, NavError>;
