use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("no action given (expected one of: {expected})")]
    MissingAction { expected: &'static str },

    #[error("unknown action '{action}' (expected one of: {expected})")]
    UnknownAction {
        action: String,
        expected: &'static str,
    },

    #[error("invalid property '{id}': {reason}")]
    InvalidProperty { id: &'static str, reason: String },

    #[error("failed to spawn '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process exited with non-zero code: {0}")]
    Failed(i32),

    #[error("process terminated by signal")]
    Terminated,

    #[error("operation cancelled")]
    Cancelled,

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExecResult<T> = Result<T, ExecError>;
