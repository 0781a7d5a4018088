use crate::error::{ProbeError, ReportError};
use crate::probe::{Probe, SystemProbe};
use chrono::Local;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Name of the report file created inside the output directory.
pub const REPORT_FILE: &str = "qgate-sln-mlrun.txt";
/// Prefix of every comment line in the report.
pub const COMMENT: &str = "# ";
/// Version of this tool, written in the header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Toolchain that built this tool, written in the footer.
pub const RUSTC_VERSION: &str = env!("QGATE_RUSTC_VERSION");

const SEPARATOR: &str = "-----------------------";
const MLRUN_DOCS: &str = "https://docs.mlrun.org/en/latest/change-log/index.html";

/// Configuration rendered into the report.
///
/// The `Display` output is written verbatim at the end of every footer, one
/// comment line per text line.
pub trait ReportConfig: fmt::Display + Send {
    /// Directory that receives the report file.
    fn output_dir(&self) -> &Path;

    /// Version of the dependent library, if known.
    fn dependency_version(&self) -> Option<&str> {
        None
    }
}

/// Dependent library named in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub version: String,
    pub docs_url: String,
}

impl Dependency {
    pub fn mlrun(version: Option<&str>) -> Self {
        Self {
            name: "MLRun".to_string(),
            version: version.unwrap_or("unknown").to_string(),
            docs_url: MLRUN_DOCS.to_string(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.name, self.version, self.docs_url)
    }
}

/// Collect the footer block, without comment prefixes.
///
/// Host and memory are best-effort and render empty on failure; CPU count and
/// working directory failures propagate.
pub fn footer_lines(
    config: &dyn ReportConfig,
    probe: &dyn Probe,
) -> Result<Vec<String>, ProbeError> {
    let host = probe.host().map(|h| h.to_string()).unwrap_or_else(|err| {
        debug!(error = %err, "host lookup failed");
        String::new()
    });
    let (total, free) = match probe.memory() {
        Ok(mem) => (mem.total_gb(), mem.free_gb()),
        Err(err) => {
            debug!(error = %err, "memory lookup failed");
            (String::new(), String::new())
        }
    };
    let platform = probe.platform();
    let dependency = Dependency::mlrun(config.dependency_version());

    Ok(vec![
        SEPARATOR.to_string(),
        format!("Host: {}", host),
        format!("RAM total/free: {}/{}", total, free),
        format!("CPU: {}", probe.cpu_count()?),
        SEPARATOR.to_string(),
        dependency.to_string(),
        format!("Rust: {}", RUSTC_VERSION),
        format!(
            "System: {} {} ({})",
            platform.system, platform.version, platform.descriptor
        ),
        format!("Platform: {} ({})", platform.machine, platform.processor),
        SEPARATOR.to_string(),
        format!("DIR: '{}'", probe.working_dir()?.display()),
        config.to_string().replace('\n', &format!("\n{}", COMMENT)),
    ])
}

/// Writes the plain-text run report.
///
/// Opening writes a header and a footer; [`RunReporter::close`] (or drop)
/// writes the footer once more and closes the file.
pub struct RunReporter {
    config: Box<dyn ReportConfig>,
    probe: Box<dyn Probe>,
    path: PathBuf,
    file: Option<File>,
    opened: Instant,
}

impl RunReporter {
    /// Open the report for `config`, probing the running system.
    pub fn open(config: impl ReportConfig + 'static) -> Result<Self, ReportError> {
        Self::with_probe(config, SystemProbe)
    }

    /// Open the report with a custom metadata probe.
    pub fn with_probe(
        config: impl ReportConfig + 'static,
        probe: impl Probe + 'static,
    ) -> Result<Self, ReportError> {
        let dir = config.output_dir().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| ReportError::Io {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(REPORT_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        let mut reporter = Self {
            config: Box::new(config),
            probe: Box::new(probe),
            path,
            file: Some(file),
            opened: Instant::now(),
        };
        reporter.header()?;
        reporter.footer()?;
        info!(path = %reporter.path.display(), "run report opened");
        Ok(reporter)
    }

    /// Path of the report file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Append `<label><values>` as one uncommented line.
    ///
    /// Line breaks inside the record are written as `\n` and `\r` escapes.
    pub fn print(&mut self, label: &str, values: impl fmt::Display) -> Result<(), ReportError> {
        debug!(label, "appending record");
        let record = format!("{}{}", label, values)
            .replace('\r', "\\r")
            .replace('\n', "\\n");
        self.write_line(Some(record.as_str()), false)
    }

    /// Write the final footer and close the file. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), ReportError> {
        if self.file.is_none() {
            return Ok(());
        }
        let footer = self.footer();
        let synced = match self.file.take() {
            Some(file) => file.sync_all().map_err(ReportError::from),
            None => Ok(()),
        };
        footer.and(synced)?;

        let lifetime = Duration::from_millis(self.opened.elapsed().as_millis() as u64);
        info!(
            path = %self.path.display(),
            lifetime = %humantime::format_duration(lifetime),
            "run report closed"
        );
        Ok(())
    }

    fn header(&mut self) -> Result<(), ReportError> {
        let version = format!("QGate version: {}", VERSION);
        self.write_line(Some(version.as_str()), true)?;
        let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.write_line(Some(now.as_str()), true)
    }

    fn footer(&mut self) -> Result<(), ReportError> {
        let lines = footer_lines(self.config.as_ref(), self.probe.as_ref())?;
        for line in &lines {
            self.write_line(Some(line.as_str()), true)?;
        }
        Ok(())
    }

    fn write_line(&mut self, text: Option<&str>, comment: bool) -> Result<(), ReportError> {
        let file = self.file.as_mut().ok_or(ReportError::Closed)?;
        let prefix = if comment { COMMENT } else { "" };
        let line = format!("{}{}\n", prefix, text.unwrap_or(""));
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

impl Drop for RunReporter {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!(path = %self.path.display(), error = %err, "failed to close run report");
        }
    }
}

impl fmt::Debug for RunReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunReporter")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .finish()
    }
}
