use std::path::PathBuf;

/// Errors raised while writing the run report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Creating the output directory or opening the report file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing a line to the open report failed.
    #[error("failed to write report line")]
    Write(#[from] std::io::Error),
    /// The report has already been closed.
    #[error("report file is closed")]
    Closed,
    /// A required metadata lookup failed.
    #[error("metadata lookup failed: {0}")]
    Probe(#[from] ProbeError),
}

/// Errors raised by the system metadata probes.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The capability is not available on this platform.
    #[error("{0} is not available")]
    Unavailable(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
