use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Plain-text run reports for QGate MLRun solution runs.
#[derive(Parser)]
#[command(name = "qgate-report", version, about, long_about = None)]
pub struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print JSON Schema for setup files.
    Schema,
    /// Print the environment footer without writing a report.
    Env(EnvArgs),
    /// Write a run report, appending the given records.
    Run(RunArgs),
}

#[derive(Args, Default)]
pub struct SetupArgs {
    /// Path to setup JSON file.
    #[arg(long)]
    pub setup: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// MLRun version reported in the footer.
    #[arg(long, env = "MLRUN_VERSION")]
    pub mlrun_version: Option<String>,
}

#[derive(Args, Default)]
pub struct EnvArgs {
    #[command(flatten)]
    pub setup: SetupArgs,
}

#[derive(Args, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub setup: SetupArgs,

    /// Record to append, as `label=value` (repeatable).
    #[arg(long = "record", value_name = "LABEL=VALUE")]
    pub records: Vec<String>,
}
