use anyhow::Context;
use clap::FromArgMatches;
use tracing::{debug, info, warn};

use radi_core::flag::{ClapContext, resolve};
use radi_exec::{ComposeOperation, Operation};
use radi_model::ProcessStreams;
use radi_observe::init_logger;

mod cli;
use cli::GlobalArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) operations and their flag surface
    let mut ops: Vec<Box<dyn Operation>> = vec![Box::new(ComposeOperation::new()?)];
    let matches = cli::command(&ops).get_matches();

    // 2) logger
    let globals = GlobalArgs::from_arg_matches(&matches)?;
    init_logger(&globals.logger_config())?;

    // 3) flags -> properties
    let (name, sub) = matches.subcommand().context("no operation given")?;
    let op = ops
        .iter_mut()
        .find(|op| op.id() == name)
        .with_context(|| format!("unknown operation '{name}'"))?;

    let resolution = resolve(&ClapContext::new(sub), &ProcessStreams::new(), op.properties_mut());
    debug!(
        operation = name,
        resolved = ?resolution.resolved().collect::<Vec<_>>(),
        "flags resolved"
    );
    for (id, err) in resolution.errors() {
        warn!(operation = name, property = id, error = %err, "flag not applied");
    }

    // 4) run
    let args = cli::positional(sub);
    op.execute(&args)
        .await
        .with_context(|| format!("operation '{name}' failed"))?;
    info!(operation = name, "done");
    Ok(())
}
