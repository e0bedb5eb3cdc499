use radi_model::{ModelError, PropertyKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlagError {
    #[error("property '{id}' of kind {kind} has no value to use as flag default")]
    MissingDefault { id: String, kind: PropertyKind },

    #[error("cannot read flag '{flag}': {reason}")]
    Access { flag: String, reason: String },

    #[error("property '{id}' projects flag '--{flag}', which is already taken")]
    DuplicateFlag { id: String, flag: String },

    #[error("invalid duration: {0}")]
    InvalidDuration(String),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

pub type FlagResult<T> = Result<T, FlagError>;
