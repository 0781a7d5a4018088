use crate::cli::{EnvArgs, RunArgs, SetupArgs};
use crate::exit_codes::exit;
use crate::model::{self, Setup};
use crate::probe::SystemProbe;
use crate::record::parse_record;
use crate::reporter::{self, COMMENT};
use crate::shared;
use anyhow::{Context, Result};
use tracing::info;

/// Print the JSON Schema of setup files.
pub fn schema() -> Result<i32> {
    println!("{}", model::generate_schema()?);
    Ok(exit::SUCCESS)
}

/// Print the footer block for the current environment.
pub fn env(args: EnvArgs) -> Result<i32> {
    let setup = match load_setup(&args.setup) {
        Ok(setup) => setup,
        Err(err) => return Ok(config_failure(err)),
    };
    let lines =
        reporter::footer_lines(&setup, &SystemProbe).context("failed to collect environment")?;
    for line in lines {
        println!("{}{}", COMMENT, line);
    }
    Ok(exit::SUCCESS)
}

/// Write a run report, append the requested records and close it.
pub fn run(args: RunArgs) -> Result<i32> {
    let setup = match load_setup(&args.setup) {
        Ok(setup) => setup,
        Err(err) => return Ok(config_failure(err)),
    };

    let shared = shared::acquire(setup).context("failed to open run report")?;
    let mut reporter = shared
        .lock()
        .map_err(|_| anyhow::anyhow!("run report lock poisoned"))?;
    for raw in &args.records {
        let (label, values) = parse_record(raw);
        reporter
            .print(&label, &values)
            .with_context(|| format!("failed to append record '{}'", label))?;
    }
    reporter.close().context("failed to close run report")?;
    info!(records = args.records.len(), "run report written");
    println!("{}", reporter.path().display());
    Ok(exit::SUCCESS)
}

/// Load the setup file (if any) and apply command-line overrides.
pub fn load_setup(args: &SetupArgs) -> Result<Setup> {
    let mut setup = match &args.setup {
        Some(path) => model::load_setup(path)
            .with_context(|| format!("failed to load setup {}", path.display()))?,
        None => Setup::default(),
    };
    if let Some(output) = &args.output {
        setup.model_output = output.clone();
    }
    if let Some(version) = &args.mlrun_version {
        setup.mlrun_version = Some(version.clone());
    }
    setup.validate()?;
    setup.resolved()
}

fn config_failure(err: anyhow::Error) -> i32 {
    eprintln!("error: {:#}", err);
    exit::CONFIG_FAILURE
}
