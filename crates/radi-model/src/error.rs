use thiserror::Error;

use crate::PropertyKind;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("type mismatch for property '{id}': expected {expected}, got {actual}")]
    TypeMismatch {
        id: String,
        expected: PropertyKind,
        actual: PropertyKind,
    },

    #[error("duplicate property id: {0}")]
    DuplicateProperty(String),

    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("unknown property kind: {0:?}")]
    UnknownKind(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
