use crate::{ModelError, ModelResult, OperationContext, PropertyKind, PropertyValue};

/// A single named, typed configuration value.
///
/// The kind is fixed at construction. Every value written through [`Property::set`] is checked
/// against it, so a stored value always matches the declared kind.
///
/// Internal properties exist for wiring between operations and never appear on the flag surface.
#[derive(Debug, Clone)]
pub struct Property {
    id: String,
    kind: PropertyKind,
    value: Option<PropertyValue>,
    default: Option<PropertyValue>,
    description: String,
    internal: bool,
}

impl Property {
    /// Declare a property of `kind` without a value.
    pub fn new(id: impl Into<String>, kind: PropertyKind, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: None,
            default: None,
            description: description.into(),
            internal: false,
        }
    }

    /// Declare a property whose kind is taken from its default value.
    pub fn with_default(
        id: impl Into<String>,
        default: impl Into<PropertyValue>,
        description: impl Into<String>,
    ) -> Self {
        let default = default.into();
        Self {
            id: id.into(),
            kind: default.kind(),
            value: Some(default.clone()),
            default: Some(default),
            description: description.into(),
            internal: false,
        }
    }

    pub fn string(
        id: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_default(id, PropertyValue::String(default.into()), description)
    }

    pub fn string_list<I, S>(id: impl Into<String>, default: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = default.into_iter().map(Into::into).collect::<Vec<String>>();
        Self::with_default(id, PropertyValue::StringList(list), description)
    }

    pub fn bytes(
        id: impl Into<String>,
        default: impl Into<Vec<u8>>,
        description: impl Into<String>,
    ) -> Self {
        Self::with_default(id, PropertyValue::Bytes(default.into()), description)
    }

    pub fn int(id: impl Into<String>, default: i32, description: impl Into<String>) -> Self {
        Self::with_default(id, PropertyValue::Int(default), description)
    }

    pub fn int64(id: impl Into<String>, default: i64, description: impl Into<String>) -> Self {
        Self::with_default(id, PropertyValue::Int64(default), description)
    }

    pub fn bool(id: impl Into<String>, default: bool, description: impl Into<String>) -> Self {
        Self::with_default(id, PropertyValue::Bool(default), description)
    }

    /// Output-sink property; unset until resolved.
    pub fn output(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, PropertyKind::Output, description)
    }

    /// Input-source property; unset until resolved.
    pub fn input(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, PropertyKind::Input, description)
    }

    /// Context property defaulting to a background (non-expiring) context.
    pub fn context(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_default(id, OperationContext::background(), description)
    }

    /// Property of a kind without a flag mapping.
    pub fn unrecognized(
        id: impl Into<String>,
        type_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(id, PropertyKind::Unrecognized(type_name.into()), description)
    }

    /// Mark the property as internal (or user-facing) and return it.
    pub fn with_internal(mut self, internal: bool) -> Self {
        self.internal = internal;
        self
    }

    /// Unique key; also the flag name.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    /// Current value, if any.
    pub fn get(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    /// Declared default, if any.
    pub fn default_value(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    /// Replace the current value.
    ///
    /// Fails with [`ModelError::TypeMismatch`] and leaves the property untouched when the value
    /// does not belong to this property's kind.
    pub fn set(&mut self, value: impl Into<PropertyValue>) -> ModelResult<()> {
        let value = value.into();
        if !value.is_kind(&self.kind) {
            return Err(ModelError::TypeMismatch {
                id: self.id.clone(),
                expected: self.kind.clone(),
                actual: value.kind(),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// Restore the declared default.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
    }

    /// Help text.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` if the property is hidden from the flag surface.
    pub fn is_internal(&self) -> bool {
        self.internal
    }
}
