use std::time::Duration;

use radi_model::{OperationContext, Property, PropertyKind, PropertySet, PropertyValue, Streams};
use tracing::{debug, warn};

use crate::{
    FlagError, FlagResult,
    flag::{FlagContext, UnhandledProperty, companion_flag_name},
};

/// What a resolution pass did with one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No flag supplied; the property keeps its previous value.
    Absent,
    /// The flag value was written into the property.
    Resolved,
    /// The flag carried a symbolic name with no meaning for this kind; the property is unchanged.
    Ignored { value: String },
    /// The property kind has no flag mapping.
    Unhandled,
    /// Reading or storing the value failed; the property is unchanged.
    Failed { reason: String },
}

/// Per-property outcomes of a resolution pass, in declaration order.
///
/// Internal properties are not part of the pass and do not appear here. Every
/// [`Outcome::Failed`] has its typed error in [`Resolution::errors`].
#[derive(Debug, Default)]
pub struct Resolution {
    outcomes: Vec<(String, Outcome)>,
    errors: Vec<(String, FlagError)>,
}

impl Resolution {
    /// Outcome for `id`, if the property took part in the pass.
    pub fn outcome(&self, id: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(pid, _)| pid == id)
            .map(|(_, o)| o)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outcome)> {
        self.outcomes.iter().map(|(id, o)| (id.as_str(), o))
    }

    /// Ids of the properties that received a value.
    pub fn resolved(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, o)| matches!(o, Outcome::Resolved))
            .map(|(id, _)| id)
    }

    /// Returns `true` if any property failed to resolve.
    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Typed errors of the failed properties, keyed by property id.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FlagError)> {
        self.errors.iter().map(|(id, e)| (id.as_str(), e))
    }

    fn fail(&mut self, id: &str, error: FlagError) -> Outcome {
        let outcome = Outcome::Failed {
            reason: error.to_string(),
        };
        self.errors.push((id.to_string(), error));
        outcome
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Intermediate result of reading one property's flag(s).
enum Decoded {
    Absent,
    Value(PropertyValue),
    Ignored(String),
    Unhandled,
    Failed(FlagError),
}

/// Write explicitly supplied flag values from `ctx` into `props`.
///
/// Only flags the user actually supplied are applied; everything else keeps its current value.
/// Internal properties are skipped. A failure on one property is logged and recorded in the
/// returned [`Resolution`]; the pass always continues with the remaining properties.
pub fn resolve<C, S>(ctx: &C, streams: &S, props: &mut PropertySet) -> Resolution
where
    C: FlagContext + ?Sized,
    S: Streams + ?Sized,
{
    let mut out = Resolution::default();

    for prop in props.iter_mut() {
        if prop.is_internal() {
            continue;
        }
        let outcome = match decode(ctx, streams, prop) {
            Decoded::Absent => Outcome::Absent,
            Decoded::Value(value) => match apply(prop, value) {
                Ok(()) => Outcome::Resolved,
                Err(e) => {
                    warn!(id = prop.id(), error = %e, "flag value rejected by property");
                    out.fail(prop.id(), e)
                }
            },
            Decoded::Ignored(value) => {
                warn!(
                    id = prop.id(),
                    kind = %prop.kind(),
                    value = %value,
                    "unrecognized symbolic value ignored"
                );
                Outcome::Ignored { value }
            }
            Decoded::Unhandled => Outcome::Unhandled,
            Decoded::Failed(e) => {
                warn!(id = prop.id(), error = %e, "flag could not be read");
                out.fail(prop.id(), e)
            }
        };

        debug!(id = prop.id(), kind = %prop.kind(), outcome = ?outcome, "property resolved from flags");
        out.outcomes.push((prop.id().to_string(), outcome));
    }
    out
}

fn apply(prop: &mut Property, value: PropertyValue) -> FlagResult<()> {
    prop.set(value)?;
    Ok(())
}

fn decode<C, S>(ctx: &C, streams: &S, prop: &Property) -> Decoded
where
    C: FlagContext + ?Sized,
    S: Streams + ?Sized,
{
    let id = prop.id();

    match prop.kind() {
        PropertyKind::String => direct(ctx, id, || ctx.string(id), PropertyValue::String),
        PropertyKind::StringList => {
            direct(ctx, id, || ctx.string_list(id), PropertyValue::StringList)
        }
        PropertyKind::Bytes => direct(ctx, id, || ctx.string(id), |s| {
            PropertyValue::Bytes(s.into_bytes())
        }),
        PropertyKind::Int => direct(ctx, id, || ctx.int(id), PropertyValue::Int),
        PropertyKind::Int64 => direct(ctx, id, || ctx.int64(id), PropertyValue::Int64),
        PropertyKind::Bool => direct(ctx, id, || ctx.bool(id), PropertyValue::Bool),
        PropertyKind::Output => symbolic(ctx, id, |name| {
            streams.output(name).map(PropertyValue::Output)
        }),
        PropertyKind::Input => symbolic(ctx, id, |name| {
            streams.input(name).map(PropertyValue::Input)
        }),
        PropertyKind::Context => companion(ctx, id),
        PropertyKind::Unrecognized(type_name) => {
            let sink = UnhandledProperty::new(id, type_name);
            match ctx.generic(id) {
                Some(raw) => {
                    // The sink never fails; the value is dropped either way.
                    let _ = sink.set(&raw);
                }
                None => sink.report("resolve"),
            }
            Decoded::Unhandled
        }
    }
}

/// Typed read of a flag named after the property.
fn direct<C, T>(
    ctx: &C,
    id: &str,
    read: impl FnOnce() -> FlagResult<Option<T>>,
    wrap: impl FnOnce(T) -> PropertyValue,
) -> Decoded
where
    C: FlagContext + ?Sized,
{
    if !ctx.is_set(id) {
        return Decoded::Absent;
    }
    match read() {
        Ok(Some(v)) => Decoded::Value(wrap(v)),
        Ok(None) => Decoded::Absent,
        Err(e) => Decoded::Failed(e),
    }
}

/// Text flag naming a stream; unknown names are ignored.
fn symbolic<C>(ctx: &C, id: &str, lookup: impl FnOnce(&str) -> Option<PropertyValue>) -> Decoded
where
    C: FlagContext + ?Sized,
{
    if !ctx.is_set(id) {
        return Decoded::Absent;
    }
    match ctx.string(id) {
        Ok(Some(name)) => match lookup(&name) {
            Some(v) => Decoded::Value(v),
            None => Decoded::Ignored(name),
        },
        Ok(None) => Decoded::Absent,
        Err(e) => Decoded::Failed(e),
    }
}

/// Context derivation driven by the `<id>:duration` companion flag.
///
/// A positive duration yields a fresh context expiring after it, zero yields a background
/// context. Without the companion flag the property stays unresolved.
fn companion<C>(ctx: &C, id: &str) -> Decoded
where
    C: FlagContext + ?Sized,
{
    let flag = companion_flag_name(id);
    if !ctx.is_set(&flag) {
        return Decoded::Absent;
    }
    match ctx.duration(&flag) {
        Ok(Some(timeout)) => Decoded::Value(PropertyValue::Context(derive_context(timeout))),
        Ok(None) => Decoded::Absent,
        Err(e) => Decoded::Failed(e),
    }
}

fn derive_context(timeout: Duration) -> OperationContext {
    if timeout > Duration::ZERO {
        OperationContext::with_timeout(timeout)
    } else {
        OperationContext::background()
    }
}
