//! `qgate-report` - plain-text run reports for QGate MLRun solution runs.
//!
//! A [`RunReporter`] writes `qgate-sln-mlrun.txt` into the configured output
//! directory: a header, a footer describing the host and configuration, any
//! records appended with [`RunReporter::print`], and a final footer on close.

pub mod cli;
pub mod engine;
pub mod error;
pub mod exit_codes;
pub mod model;
pub mod probe;
pub mod record;
pub mod reporter;
pub mod shared;
pub mod telemetry;

pub use error::{ProbeError, ReportError};
pub use record::Values;
pub use reporter::{ReportConfig, RunReporter};
