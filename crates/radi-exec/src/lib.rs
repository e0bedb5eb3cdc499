//! Operations: named units of work configured through a [`radi_model::PropertySet`].
mod error;
pub use error::{ExecError, ExecResult};

mod operation;
pub use operation::Operation;

mod subprocess;
pub use subprocess::run_child;

pub mod compose;
pub use compose::{ComposeAction, ComposeOperation};
