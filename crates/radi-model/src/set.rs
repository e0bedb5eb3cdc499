use std::collections::HashMap;

use crate::{
    InputStream, ModelError, ModelResult, OperationContext, OutputStream, Property, PropertyValue,
};

/// Ordered, uniquely keyed collection of [`Property`] values.
///
/// Insertion order is preserved and is the order in which flags are projected and resolved.
/// Lookups never change that order.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    props: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property.
    ///
    /// Fails with [`ModelError::DuplicateProperty`] if the id is already taken.
    pub fn insert(&mut self, prop: Property) -> ModelResult<()> {
        if self.index.contains_key(prop.id()) {
            return Err(ModelError::DuplicateProperty(prop.id().to_string()));
        }
        self.index.insert(prop.id().to_string(), self.props.len());
        self.props.push(prop);
        Ok(())
    }

    /// Append a property and return the set, for declaration chains.
    pub fn with(mut self, prop: Property) -> ModelResult<Self> {
        self.insert(prop)?;
        Ok(self)
    }

    /// Property ids in insertion order.
    pub fn order(&self) -> impl Iterator<Item = &str> {
        self.props.iter().map(|p| p.id())
    }

    /// Properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    /// Mutable access to the properties in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Property> {
        self.props.iter_mut()
    }

    pub fn get(&self, id: &str) -> Option<&Property> {
        self.index.get(id).map(|&i| &self.props[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Property> {
        match self.index.get(id) {
            Some(&i) => Some(&mut self.props[i]),
            None => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Set the value of the property `id`.
    pub fn set(&mut self, id: &str, value: impl Into<PropertyValue>) -> ModelResult<()> {
        self.get_mut(id)
            .ok_or_else(|| ModelError::UnknownProperty(id.to_string()))?
            .set(value)
    }

    /// Current value of `id`, if the property exists and holds one.
    pub fn value(&self, id: &str) -> Option<&PropertyValue> {
        self.get(id).and_then(Property::get)
    }

    pub fn string(&self, id: &str) -> Option<&str> {
        self.value(id).and_then(PropertyValue::as_str)
    }

    pub fn string_list(&self, id: &str) -> Option<&[String]> {
        self.value(id).and_then(PropertyValue::as_string_list)
    }

    pub fn bytes(&self, id: &str) -> Option<&[u8]> {
        self.value(id).and_then(PropertyValue::as_bytes)
    }

    pub fn int(&self, id: &str) -> Option<i32> {
        self.value(id).and_then(PropertyValue::as_int)
    }

    pub fn int64(&self, id: &str) -> Option<i64> {
        self.value(id).and_then(PropertyValue::as_int64)
    }

    pub fn bool(&self, id: &str) -> Option<bool> {
        self.value(id).and_then(PropertyValue::as_bool)
    }

    pub fn output(&self, id: &str) -> Option<&OutputStream> {
        self.value(id).and_then(PropertyValue::as_output)
    }

    pub fn input(&self, id: &str) -> Option<&InputStream> {
        self.value(id).and_then(PropertyValue::as_input)
    }

    pub fn context(&self, id: &str) -> Option<&OperationContext> {
        self.value(id).and_then(PropertyValue::as_context)
    }
}

impl TryFrom<Vec<Property>> for PropertySet {
    type Error = ModelError;

    fn try_from(props: Vec<Property>) -> Result<Self, Self::Error> {
        let mut set = PropertySet::new();
        for prop in props {
            set.insert(prop)?;
        }
        Ok(set)
    }
}
