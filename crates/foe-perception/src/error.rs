use thiserror::Error;

use crate::ZoneKind;

#[derive(Debug, Error)]
pub enum PerceptionError {
    #[error("{kind:?} zone: min range {min} exceeds max range {max}")]
    InvertedRange { kind: ZoneKind, min: f32, max: f32 },

    #[error("{kind:?} zone: half angle {deg}° outside (0, 180]")]
    BadAngle { kind: ZoneKind, deg: f32 },

    #[error("perception configuration error: {0}")]
    Config(String),
}

pub type PerceptionResult<T> = Result<T, PerceptionError>;
