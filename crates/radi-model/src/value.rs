use crate::{InputStream, OperationContext, OutputStream, PropertyKind};

/// Typed value of a property.
///
/// One variant per [`PropertyKind`]; [`PropertyValue::kind`] gives the tag a value belongs to.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    String(String),
    StringList(Vec<String>),
    Bytes(Vec<u8>),
    Int(i32),
    Int64(i64),
    Bool(bool),
    Output(OutputStream),
    Input(InputStream),
    Context(OperationContext),
    /// Value of a kind without a flag mapping, kept in its raw textual form.
    Unrecognized { type_name: String, raw: String },
}

impl PropertyValue {
    /// Kind this value belongs to.
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::StringList(_) => PropertyKind::StringList,
            PropertyValue::Bytes(_) => PropertyKind::Bytes,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Int64(_) => PropertyKind::Int64,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Output(_) => PropertyKind::Output,
            PropertyValue::Input(_) => PropertyKind::Input,
            PropertyValue::Context(_) => PropertyKind::Context,
            PropertyValue::Unrecognized { type_name, .. } => {
                PropertyKind::Unrecognized(type_name.clone())
            }
        }
    }

    /// Returns `true` if this value may be stored in a property of `kind`.
    pub fn is_kind(&self, kind: &PropertyKind) -> bool {
        match (self, kind) {
            (PropertyValue::Unrecognized { type_name, .. }, PropertyKind::Unrecognized(name)) => {
                type_name == name
            }
            _ => &self.kind() == kind,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StringList(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PropertyValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            PropertyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_int64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_output(&self) -> Option<&OutputStream> {
        match self {
            PropertyValue::Output(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_input(&self) -> Option<&InputStream> {
        match self {
            PropertyValue::Input(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_context(&self) -> Option<&OperationContext> {
        match self {
            PropertyValue::Context(c) => Some(c),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(v: Vec<String>) -> Self {
        PropertyValue::StringList(v)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(b: Vec<u8>) -> Self {
        PropertyValue::Bytes(b)
    }
}

impl From<i32> for PropertyValue {
    fn from(n: i32) -> Self {
        PropertyValue::Int(n)
    }
}

impl From<i64> for PropertyValue {
    fn from(n: i64) -> Self {
        PropertyValue::Int64(n)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<OutputStream> for PropertyValue {
    fn from(w: OutputStream) -> Self {
        PropertyValue::Output(w)
    }
}

impl From<InputStream> for PropertyValue {
    fn from(r: InputStream) -> Self {
        PropertyValue::Input(r)
    }
}

impl From<OperationContext> for PropertyValue {
    fn from(c: OperationContext) -> Self {
        PropertyValue::Context(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_impls_pick_the_matching_kind() {
        assert_eq!(PropertyValue::from("x").kind(), PropertyKind::String);
        assert_eq!(PropertyValue::from(vec!["a".to_string()]).kind(), PropertyKind::StringList);
        assert_eq!(PropertyValue::from(b"raw".to_vec()).kind(), PropertyKind::Bytes);
        assert_eq!(PropertyValue::from(7i32).kind(), PropertyKind::Int);
        assert_eq!(PropertyValue::from(7i64).kind(), PropertyKind::Int64);
        assert_eq!(PropertyValue::from(true).kind(), PropertyKind::Bool);
        assert_eq!(
            PropertyValue::from(OperationContext::background()).kind(),
            PropertyKind::Context
        );
    }

    #[test]
    fn accessors_only_match_their_variant() {
        let v = PropertyValue::Int(3);
        assert_eq!(v.as_int(), Some(3));
        assert_eq!(v.as_int64(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_bool(), None);
    }

    #[test]
    fn unrecognized_values_compare_by_type_name() {
        let v = PropertyValue::Unrecognized {
            type_name: "net.IP".into(),
            raw: "127.0.0.1".into(),
        };
        assert!(v.is_kind(&PropertyKind::Unrecognized("net.IP".into())));
        assert!(!v.is_kind(&PropertyKind::Unrecognized("url.URL".into())));
        assert!(!v.is_kind(&PropertyKind::String));
    }
}
