use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::ModelError;

/// Type tag of a property.
///
/// The tag decides how a value is projected onto a flag and how a flag value is decoded back.
/// Every kind the flag layer understands has its own variant; anything else is carried as
/// [`PropertyKind::Unrecognized`] with the original type name so it can still be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// UTF-8 text.
    String,
    /// Ordered list of UTF-8 strings.
    StringList,
    /// Raw byte sequence, exchanged with the flag layer as text.
    Bytes,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Int64,
    /// Boolean switch.
    Bool,
    /// Writable stream selected by a symbolic name (`stdout`, `stderr`).
    Output,
    /// Readable stream selected by a symbolic name (`stdin`).
    Input,
    /// Cancellable execution context, optionally bound to a timeout.
    Context,
    /// Kind without a flag mapping.
    Unrecognized(String),
}

impl PropertyKind {
    /// Canonical tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            PropertyKind::String => "string",
            PropertyKind::StringList => "string-list",
            PropertyKind::Bytes => "bytes",
            PropertyKind::Int => "int",
            PropertyKind::Int64 => "int64",
            PropertyKind::Bool => "bool",
            PropertyKind::Output => "output",
            PropertyKind::Input => "input",
            PropertyKind::Context => "context",
            PropertyKind::Unrecognized(name) => name,
        }
    }

    /// Returns `true` for kinds the flag layer has no mapping for.
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, PropertyKind::Unrecognized(_))
    }
}

impl FromStr for PropertyKind {
    type Err = ModelError;

    /// Parses a type tag.
    ///
    /// Unknown non-empty tags become [`PropertyKind::Unrecognized`]; only an empty tag is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        let kind = match norm.to_ascii_lowercase().as_str() {
            "" => return Err(ModelError::UnknownKind(s.to_string())),
            "string" => Self::String,
            "string-list" | "[]string" => Self::StringList,
            "bytes" | "[]byte" => Self::Bytes,
            "int" | "int32" => Self::Int,
            "int64" => Self::Int64,
            "bool" => Self::Bool,
            "output" | "io.writer" => Self::Output,
            "input" | "io.reader" => Self::Input,
            "context" | "context.context" | "golang.org/x/net/context.context" => Self::Context,
            _ => Self::Unrecognized(norm.to_string()),
        };
        Ok(kind)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PropertyKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PropertyKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
