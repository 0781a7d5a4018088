//! `qgate-report` - plain-text run reports for QGate MLRun solution runs.

use anyhow::Result;
use clap::Parser;

use qgate_report::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    qgate_report::telemetry::init_tracing(cli.verbose);
    let exit_code = match cli.command {
        Command::Schema => qgate_report::engine::schema()?,
        Command::Env(args) => qgate_report::engine::env(args)?,
        Command::Run(args) => qgate_report::engine::run(args)?,
    };
    std::process::exit(exit_code);
}
