//! `docker compose` wrapper with `pull`, `up`, `down` and `info` sub-actions.
mod action;
pub use action::ComposeAction;

mod args;
pub use args::compose_args;

use async_trait::async_trait;
use radi_model::{ModelResult, OperationContext, Property, PropertySet};
use tracing::{debug, info, warn};

use crate::{ExecError, ExecResult, Operation, run_child};

/// Property ids of the compose operation.
pub mod ids {
    pub const NO_RECREATE: &str = "no-recreate";
    pub const FORCE_RECREATE: &str = "force-recreate";
    pub const NO_BUILD: &str = "no-build";
    pub const REMOVE_VOLUMES: &str = "remove-volumes";
    pub const REMOVE_IMAGES: &str = "remove-images";
    pub const NO_REMOVE_ORPHANS: &str = "no-remove-orphans";
    pub const PROJECT_DIR: &str = "project-dir";
    pub const COMPOSE_FILE: &str = "compose-file";
    pub const OUTPUT: &str = "output";
    pub const CONTEXT: &str = "context";
    pub const BINARY: &str = "binary";
}

const DEFAULT_BINARY: &str = "docker";

/// Property set of a fresh compose operation.
pub fn compose_properties() -> ModelResult<PropertySet> {
    PropertySet::try_from(vec![
        Property::bool(ids::NO_RECREATE, false, "up: keep existing containers"),
        Property::bool(ids::FORCE_RECREATE, false, "up: recreate containers even if unchanged"),
        Property::bool(ids::NO_BUILD, false, "up: do not build missing images"),
        Property::bool(ids::REMOVE_VOLUMES, false, "down: remove named and anonymous volumes"),
        Property::string(ids::REMOVE_IMAGES, "", "down: remove images used by services (local|all)"),
        Property::bool(ids::NO_REMOVE_ORPHANS, false, "down: keep containers of undeclared services"),
        Property::string(ids::PROJECT_DIR, "", "Compose project directory"),
        Property::string_list(ids::COMPOSE_FILE, Vec::<String>::new(), "Compose file (repeatable)"),
        Property::output(ids::OUTPUT, "Where command output goes (stdout|stderr)"),
        Property::context(ids::CONTEXT, "Bounds the whole compose run."),
        Property::string(ids::BINARY, DEFAULT_BINARY, "Container CLI binary").with_internal(true),
    ])
}

/// Compose operation over a configurable container CLI.
#[derive(Debug, Clone)]
pub struct ComposeOperation {
    props: PropertySet,
}

impl ComposeOperation {
    pub fn new() -> ModelResult<Self> {
        Ok(Self {
            props: compose_properties()?,
        })
    }

    /// Use `binary` instead of `docker` (e.g. `podman`).
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        let binary: String = binary.into();
        if let Err(e) = self.props.set(ids::BINARY, binary) {
            warn!(error = %e, "binary override rejected");
        }
        self
    }

    fn binary(&self) -> &str {
        self.props.string(ids::BINARY).unwrap_or(DEFAULT_BINARY)
    }

    /// Run-scoped child of the `context` property: it ends with the property's context but
    /// cancelling it leaves the property untouched.
    fn run_context(&self) -> OperationContext {
        self.props
            .context(ids::CONTEXT)
            .map(OperationContext::child)
            .unwrap_or_default()
    }
}

#[async_trait]
impl Operation for ComposeOperation {
    fn id(&self) -> &str {
        "compose"
    }

    fn description(&self) -> &str {
        "Manage the compose project (pull, up, down, info)"
    }

    fn properties(&self) -> &PropertySet {
        &self.props
    }

    fn properties_mut(&mut self) -> &mut PropertySet {
        &mut self.props
    }

    async fn execute(&self, args: &[String]) -> ExecResult<()> {
        let Some(first) = args.first() else {
            warn!("no action passed to the compose operation");
            return Err(ExecError::MissingAction {
                expected: ComposeAction::EXPECTED,
            });
        };
        let action: ComposeAction = first.parse()?;
        if args.len() > 1 {
            debug!(extra = ?&args[1..], "ignoring extra compose arguments");
        }

        let argv = compose_args(action, &self.props)?;
        let ctx = self.run_context();
        info!(%action, binary = self.binary(), "running compose");

        run_child(self.binary(), &argv, &ctx, self.props.output(ids::OUTPUT)).await
    }
}

#[cfg(test)]
mod tests {
    use radi_model::{MemoryStreams, PropertyKind, Streams};

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn properties_are_declared_in_order() {
        let op = ComposeOperation::new().unwrap();
        let order: Vec<_> = op.properties().order().collect();

        assert_eq!(order.first(), Some(&ids::NO_RECREATE));
        assert_eq!(order.last(), Some(&ids::BINARY));
        assert_eq!(order.len(), 11);
        assert_eq!(
            op.properties().get(ids::CONTEXT).map(Property::kind),
            Some(&PropertyKind::Context)
        );
    }

    #[test]
    fn binary_is_internal_and_overridable() {
        let op = ComposeOperation::new().unwrap().with_binary("podman");

        assert!(op.properties().get(ids::BINARY).unwrap().is_internal());
        assert_eq!(op.binary(), "podman");
        assert_eq!(ComposeOperation::new().unwrap().binary(), "docker");
    }

    #[tokio::test]
    async fn missing_action_is_an_error() {
        let err = ComposeOperation::new().unwrap().execute(&[]).await.unwrap_err();
        assert!(matches!(err, ExecError::MissingAction { .. }));
    }

    #[tokio::test]
    async fn unknown_action_never_spawns() {
        let op = ComposeOperation::new().unwrap().with_binary("radi-no-such-binary");
        let err = op.execute(&args(&["restart"])).await.unwrap_err();
        assert!(matches!(err, ExecError::UnknownAction { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runs_binary_with_built_arguments() {
        let streams = MemoryStreams::default();
        let mut op = ComposeOperation::new().unwrap().with_binary("echo");
        let props = op.properties_mut();
        props.set(ids::FORCE_RECREATE, true).unwrap();
        props.set(ids::OUTPUT, streams.stdout()).unwrap();

        op.execute(&args(&["up"])).await.unwrap();

        assert_eq!(streams.stdout_contents(), b"compose up -d --force-recreate\n");
    }

    #[tokio::test]
    async fn cancelled_context_stops_before_spawn() {
        let mut op = ComposeOperation::new().unwrap().with_binary("radi-no-such-binary");
        let ctx = OperationContext::background();
        ctx.cancel();
        op.properties_mut().set(ids::CONTEXT, ctx).unwrap();

        let err = op.execute(&args(&["pull"])).await.unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
    }

    #[test]
    fn run_context_follows_property_context() {
        let mut op = ComposeOperation::new().unwrap();
        let parent = OperationContext::with_timeout(std::time::Duration::from_secs(30));
        op.properties_mut().set(ids::CONTEXT, parent.clone()).unwrap();

        let run = op.run_context();
        assert_eq!(run.deadline(), parent.deadline());

        run.cancel();
        assert!(!parent.is_cancelled());

        let run = op.run_context();
        parent.cancel();
        assert!(run.is_cancelled());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn cancelling_property_context_stops_running_child() {
        let mut op = ComposeOperation::new().unwrap();
        let ctx = OperationContext::background();
        op.properties_mut().set(ids::CONTEXT, ctx.clone()).unwrap();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            ctx.cancel();
        });

        let err = run_child("sleep", &args(&["5"]), &op.run_context(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::Cancelled));
    }
}
