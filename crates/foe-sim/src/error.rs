use thiserror::Error;

use foe_brain::BrainError;
use foe_core::CoreError;
use foe_squad::SquadError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("agent construction failed: {0}")]
    Brain(#[from] BrainError),

    #[error(transparent)]
    Squad(#[from] SquadError),
}

pub type SimResult<T> = Result<T, SimError>;
