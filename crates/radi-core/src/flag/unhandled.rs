use std::fmt;

use radi_model::{Property, PropertyKind};
use tracing::debug;

use crate::FlagResult;

/// Stand-in for a property whose kind has no flag mapping.
///
/// It can be set from text and rendered as text, so the property can still take part in flag
/// handling. Every interaction is logged with the property id and type; values are discarded.
#[derive(Debug, Clone, Copy)]
pub struct UnhandledProperty<'a> {
    id: &'a str,
    type_name: &'a str,
}

impl<'a> UnhandledProperty<'a> {
    pub fn new(id: &'a str, type_name: &'a str) -> Self {
        Self { id, type_name }
    }

    /// Sink for `prop`, or `None` if its kind is mapped.
    pub fn of(prop: &'a Property) -> Option<Self> {
        match prop.kind() {
            PropertyKind::Unrecognized(type_name) => Some(Self::new(prop.id(), type_name)),
            _ => None,
        }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn type_name(&self) -> &str {
        self.type_name
    }

    /// Accept a raw value. The value is logged and dropped.
    pub fn set(&self, raw: &str) -> FlagResult<()> {
        debug!(id = self.id, kind = self.type_name, raw, "unhandled property set");
        Ok(())
    }

    /// Emit the diagnostic for `stage` (`project`, `resolve`) without a value.
    pub fn report(&self, stage: &'static str) {
        debug!(
            id = self.id,
            kind = self.type_name,
            stage,
            "unhandled property type for operation"
        );
    }
}

impl fmt::Display for UnhandledProperty<'_> {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug!(id = self.id, kind = self.type_name, "unhandled property retrieve");
        Ok(())
    }
}
