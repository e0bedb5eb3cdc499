use clap::{Arg, ArgMatches, Args, Command};
use radi_core::flag::augment_command;
use radi_exec::Operation;
use radi_observe::{LoggerConfig, LoggerFormat, LoggerLevel};

/// Id of the positional arguments handed to [`Operation::execute`].
const ARGS: &str = "args";

/// Flags shared by every operation.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Log filter expression (e.g. "info", "radi_core=debug,info")
    #[arg(long = "log-level", env = "RADI_LOG", default_value = "info", global = true)]
    pub log_level: LoggerLevel,

    /// Log output format (text|json)
    #[arg(long = "log-format", env = "RADI_LOG_FORMAT", default_value = "text", global = true)]
    pub log_format: LoggerFormat,
}

impl GlobalArgs {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            format: self.log_format,
            level: self.log_level.clone(),
            ..Default::default()
        }
    }
}

/// Root command: global flags plus one subcommand per operation, each carrying the flags
/// projected from that operation's properties.
pub fn command(ops: &[Box<dyn Operation>]) -> Command {
    let root = Command::new("radi")
        .about("Run operations configured through typed properties")
        .subcommand_required(true)
        .arg_required_else_help(true);

    ops.iter().fold(GlobalArgs::augment_args(root), |cmd, op| {
        cmd.subcommand(operation_command(op.as_ref()))
    })
}

fn operation_command(op: &dyn Operation) -> Command {
    let cmd = Command::new(op.id().to_string())
        .about(op.description().to_string())
        .arg(
            Arg::new(ARGS)
                .value_name("ACTION")
                .num_args(1..)
                .help("Action and its arguments"),
        );
    augment_command(cmd, op.properties())
}

/// Positional arguments of an operation subcommand.
pub fn positional(matches: &ArgMatches) -> Vec<String> {
    matches
        .try_get_many::<String>(ARGS)
        .ok()
        .flatten()
        .map(|vals| vals.cloned().collect())
        .unwrap_or_default()
}
