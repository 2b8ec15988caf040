use foe_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteeringError {
    #[error("context map resolution must be at least 1")]
    ZeroResolution,

    #[error("steering configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SteeringResult<T> = Result<T, SteeringError>;
