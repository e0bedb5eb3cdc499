//! Flag projection and resolution.
//!
//! Every property kind is handled in exactly one `match` in [`project`] and one in [`resolve`];
//! adding a kind to [`radi_model::PropertyKind`] makes both fail to compile until it is mapped.
mod context;
pub use context::{ClapContext, FlagContext};

mod decl;
pub use decl::{FlagBinding, FlagDecl, FlagDefault, FlagShape};

mod duration;
pub use duration::parse_duration;

mod project;
pub use project::{Projection, augment_command, project, project_report};

mod resolve;
pub use resolve::{Outcome, Resolution, resolve};

mod unhandled;
pub use unhandled::UnhandledProperty;

/// Suffix of the companion flag that drives a context property.
pub const COMPANION_DURATION_SUFFIX: &str = ":duration";

/// Name of the companion duration flag for the context property `id`.
pub fn companion_flag_name(id: &str) -> String {
    format!("{id}{COMPANION_DURATION_SUFFIX}")
}
