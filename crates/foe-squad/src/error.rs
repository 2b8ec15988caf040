use thiserror::Error;

#[derive(Debug, Error)]
pub enum SquadError {
    #[error("squad configuration error: {0}")]
    Config(String),
}

pub type SquadResult<T> = Result<T, SquadError>;
