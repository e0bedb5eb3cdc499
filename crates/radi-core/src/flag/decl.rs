use std::fmt;

use clap::{Arg, ArgAction, value_parser};

use crate::flag::{COMPANION_DURATION_SUFFIX, companion_flag_name, parse_duration};

/// Value shape of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    /// Single text value.
    Text,
    /// Text value that may be repeated.
    TextList,
    /// Single 32-bit integer.
    Int,
    /// Single 64-bit integer.
    Int64,
    /// Boolean switch without a value.
    Switch,
    /// Single duration (`30s`, `1m30s`, `250ms`, bare number = seconds).
    Duration,
}

/// Default literal shown in help and used by the parser when the flag is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagDefault {
    Text(String),
    TextList(Vec<String>),
    Int(i32),
    Int64(i64),
}

/// How a flag maps back onto its property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagBinding {
    /// Flag name equals the property id.
    Direct,
    /// Synthetic flag derived from `property`; the property itself has no flag.
    Companion { property: String, suffix: &'static str },
}

/// CLI-facing declaration derived from one property.
///
/// Declarations are rebuilt on every projection and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDecl {
    name: String,
    default: Option<FlagDefault>,
    help: String,
    shape: FlagShape,
    binding: FlagBinding,
}

impl FlagDecl {
    /// Declaration whose name is the property id.
    pub fn direct(id: impl Into<String>, shape: FlagShape, help: impl Into<String>) -> Self {
        Self {
            name: id.into(),
            default: None,
            help: help.into(),
            shape,
            binding: FlagBinding::Direct,
        }
    }

    /// Duration declaration driving the context property `id`.
    pub fn companion(id: &str, help: impl Into<String>) -> Self {
        Self {
            name: companion_flag_name(id),
            default: None,
            help: help.into(),
            shape: FlagShape::Duration,
            binding: FlagBinding::Companion {
                property: id.to_string(),
                suffix: COMPANION_DURATION_SUFFIX,
            },
        }
    }

    /// Attach a default literal.
    pub fn with_default(mut self, default: FlagDefault) -> Self {
        self.default = Some(default);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&FlagDefault> {
        self.default.as_ref()
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn shape(&self) -> FlagShape {
        self.shape
    }

    pub fn binding(&self) -> &FlagBinding {
        &self.binding
    }

    /// Id of the property this flag writes to.
    pub fn property_id(&self) -> &str {
        match &self.binding {
            FlagBinding::Direct => &self.name,
            FlagBinding::Companion { property, .. } => property,
        }
    }

    /// Build the clap argument for this declaration.
    ///
    /// Empty text defaults are not registered with clap; an absent flag reads as unset either way.
    pub fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .help(self.help.clone());

        let arg = match self.shape {
            FlagShape::Text => arg
                .action(ArgAction::Set)
                .value_parser(value_parser!(String)),
            FlagShape::TextList => arg
                .action(ArgAction::Append)
                .value_parser(value_parser!(String)),
            FlagShape::Int => arg.action(ArgAction::Set).value_parser(value_parser!(i32)),
            FlagShape::Int64 => arg.action(ArgAction::Set).value_parser(value_parser!(i64)),
            FlagShape::Switch => arg.action(ArgAction::SetTrue),
            FlagShape::Duration => arg
                .action(ArgAction::Set)
                .value_name("DURATION")
                .value_parser(parse_duration),
        };

        match &self.default {
            Some(FlagDefault::Text(s)) if s.is_empty() => arg,
            Some(FlagDefault::Text(s)) => arg.default_value(s.clone()),
            Some(FlagDefault::TextList(v)) if v.is_empty() => arg,
            Some(FlagDefault::TextList(v)) => arg.default_values(v.clone()),
            Some(FlagDefault::Int(n)) => arg.default_value(n.to_string()),
            Some(FlagDefault::Int64(n)) => arg.default_value(n.to_string()),
            None => arg,
        }
    }
}

impl fmt::Display for FlagDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{} ({:?})", self.name, self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Command;

    fn cmd(decl: &FlagDecl) -> Command {
        Command::new("test").no_binary_name(true).arg(decl.to_arg())
    }

    #[test]
    fn companion_binding_points_back_to_property() {
        let decl = FlagDecl::companion("context", "Timeout");

        assert_eq!(decl.name(), "context:duration");
        assert_eq!(decl.property_id(), "context");
        assert_eq!(decl.shape(), FlagShape::Duration);
        assert!(decl.default().is_none());
        assert_eq!(
            decl.binding(),
            &FlagBinding::Companion {
                property: "context".into(),
                suffix: ":duration",
            }
        );
    }

    #[test]
    fn text_default_is_applied_by_parser() {
        let decl = FlagDecl::direct("name", FlagShape::Text, "Name")
            .with_default(FlagDefault::Text("radi".into()));

        let m = cmd(&decl).try_get_matches_from(Vec::<&str>::new()).unwrap();
        assert_eq!(m.get_one::<String>("name").map(String::as_str), Some("radi"));
    }

    #[test]
    fn empty_text_default_is_not_registered() {
        let decl = FlagDecl::direct("output", FlagShape::Text, "")
            .with_default(FlagDefault::Text(String::new()));

        let m = cmd(&decl).try_get_matches_from(Vec::<&str>::new()).unwrap();
        assert!(m.get_one::<String>("output").is_none());
    }

    #[test]
    fn list_flag_accepts_repeats() {
        let decl = FlagDecl::direct("file", FlagShape::TextList, "");

        let m = cmd(&decl)
            .try_get_matches_from(["--file", "a.yml", "--file", "b.yml"])
            .unwrap();
        let files: Vec<_> = m.get_many::<String>("file").unwrap().cloned().collect();
        assert_eq!(files, ["a.yml", "b.yml"]);
    }

    #[test]
    fn int_flag_rejects_text() {
        let decl = FlagDecl::direct("count", FlagShape::Int, "");
        assert!(cmd(&decl).try_get_matches_from(["--count", "many"]).is_err());
    }

    #[test]
    fn switch_takes_no_value() {
        let decl = FlagDecl::direct("force", FlagShape::Switch, "");
        let m = cmd(&decl).try_get_matches_from(["--force"]).unwrap();
        assert!(m.get_flag("force"));
    }

    #[test]
    fn display_shows_flag_name() {
        let decl = FlagDecl::direct("force", FlagShape::Switch, "");
        assert_eq!(decl.to_string(), "--force (Switch)");
    }
}
