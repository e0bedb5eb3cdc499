use std::collections::HashSet;

use clap::Command;
use radi_model::{Property, PropertyKind, PropertySet, PropertyValue};
use tracing::{trace, warn};

use crate::{
    FlagError, FlagResult,
    flag::{FlagDecl, FlagDefault, FlagShape, UnhandledProperty},
};

/// Result of a projection pass: declarations in property order plus the properties that could
/// not be projected.
#[derive(Debug, Default)]
pub struct Projection {
    pub flags: Vec<FlagDecl>,
    pub errors: Vec<FlagError>,
}

/// Flag names clap registers on every command.
const RESERVED_FLAGS: &[&str] = &["help"];

/// Project a property set onto flag declarations.
///
/// Internal properties and properties of unrecognized kinds produce no flag. Properties that
/// fail to project, or whose flag name is already taken, are logged and skipped; see
/// [`project_report`] to inspect the failures.
pub fn project(props: &PropertySet) -> Vec<FlagDecl> {
    project_report(props).flags
}

/// Like [`project`], keeping the per-property errors.
pub fn project_report(props: &PropertySet) -> Projection {
    let mut out = Projection::default();
    let mut taken: HashSet<String> = RESERVED_FLAGS.iter().map(|s| s.to_string()).collect();

    for prop in props.iter() {
        if prop.is_internal() {
            trace!(id = prop.id(), "internal property has no flag");
            continue;
        }
        let declared = declare(prop).and_then(|decl| match decl {
            Some(decl) if !taken.insert(decl.name().to_string()) => Err(FlagError::DuplicateFlag {
                id: prop.id().to_string(),
                flag: decl.name().to_string(),
            }),
            other => Ok(other),
        });
        match declared {
            Ok(Some(decl)) => {
                trace!(id = prop.id(), flag = %decl, "flag projected");
                out.flags.push(decl);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(id = prop.id(), error = %e, "property skipped from flag surface");
                out.errors.push(e);
            }
        }
    }
    out
}

/// Attach the flags projected from `props` to `cmd`.
///
/// Flags whose name is already an argument of `cmd` are skipped.
pub fn augment_command(cmd: Command, props: &PropertySet) -> Command {
    project(props).iter().fold(cmd, |cmd, decl| {
        if cmd.get_arguments().any(|a| a.get_id() == decl.name()) {
            warn!(id = decl.property_id(), flag = decl.name(), "flag already defined on command");
            return cmd;
        }
        cmd.arg(decl.to_arg())
    })
}

fn declare(prop: &Property) -> FlagResult<Option<FlagDecl>> {
    let id = prop.id();
    let help = prop.description();

    let decl = match prop.kind() {
        PropertyKind::String => {
            let v = current(prop, |v| v.as_str().map(str::to_string))?;
            FlagDecl::direct(id, FlagShape::Text, help).with_default(FlagDefault::Text(v))
        }
        PropertyKind::StringList => {
            let v = current(prop, |v| v.as_string_list().map(<[String]>::to_vec))?;
            FlagDecl::direct(id, FlagShape::TextList, help).with_default(FlagDefault::TextList(v))
        }
        PropertyKind::Bytes => {
            let v = current(prop, |v| {
                v.as_bytes()
                    .map(|b| String::from_utf8_lossy(b).into_owned())
            })?;
            FlagDecl::direct(id, FlagShape::Text, help).with_default(FlagDefault::Text(v))
        }
        PropertyKind::Int => {
            let v = current(prop, PropertyValue::as_int)?;
            FlagDecl::direct(id, FlagShape::Int, help).with_default(FlagDefault::Int(v))
        }
        PropertyKind::Int64 => {
            let v = current(prop, PropertyValue::as_int64)?;
            FlagDecl::direct(id, FlagShape::Int64, help).with_default(FlagDefault::Int64(v))
        }
        PropertyKind::Bool => FlagDecl::direct(id, FlagShape::Switch, help),
        PropertyKind::Output | PropertyKind::Input => FlagDecl::direct(id, FlagShape::Text, help)
            .with_default(FlagDefault::Text(String::new())),
        PropertyKind::Context => FlagDecl::companion(id, format!("Timeout duration. {help}")),
        PropertyKind::Unrecognized(type_name) => {
            UnhandledProperty::new(id, type_name).report("project");
            return Ok(None);
        }
    };
    Ok(Some(decl))
}

/// Current value of `prop` as the flag default.
fn current<'a, T>(
    prop: &'a Property,
    pick: impl FnOnce(&'a PropertyValue) -> Option<T>,
) -> FlagResult<T> {
    prop.get()
        .and_then(pick)
        .ok_or_else(|| FlagError::MissingDefault {
            id: prop.id().to_string(),
            kind: prop.kind().clone(),
        })
}
