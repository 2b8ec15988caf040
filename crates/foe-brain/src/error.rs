use thiserror::Error;

use foe_core::CoreError;
use foe_nav::NavError;
use foe_perception::PerceptionError;
use foe_steering::SteeringError;

#[derive(Debug, Error)]
pub enum BrainError {
    #[error("brain configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Steering(#[from] SteeringError),

    #[error(transparent)]
    Perception(#[from] PerceptionError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type BrainResult<T> = Result<T, BrainError>;
