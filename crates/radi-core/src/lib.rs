//! Binding between typed property sets and a clap flag surface.
//!
//! [`flag::project`] turns a [`radi_model::PropertySet`] into flag declarations,
//! [`flag::resolve`] writes explicitly supplied flag values back into the set.
pub mod error;
pub mod flag;

pub use error::{FlagError, FlagResult};

pub mod prelude {
    pub use crate::error::FlagError;
    pub use crate::flag::{
        ClapContext, FlagContext, FlagDecl, Outcome, Resolution, augment_command, project,
        resolve,
    };
}
