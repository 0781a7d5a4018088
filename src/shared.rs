//! Process-wide access to one run report.
//!
//! The report is produced once per process. The registry only holds a weak
//! handle: the report lives as long as some caller holds a
//! [`SharedReporter`], and dropping the last one writes the final footer and
//! closes the file. After that, [`acquire`] fails with
//! [`ReportError::Closed`] rather than truncating the finished report.

use crate::error::ReportError;
use crate::reporter::{ReportConfig, RunReporter};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, Weak};
use tracing::debug;

/// Handle to the process-wide reporter.
pub type SharedReporter = Arc<Mutex<RunReporter>>;

enum Slot {
    Empty,
    Live(Weak<Mutex<RunReporter>>),
    Closed,
}

static REGISTRY: OnceLock<Mutex<Slot>> = OnceLock::new();

fn registry() -> MutexGuard<'static, Slot> {
    REGISTRY
        .get_or_init(|| Mutex::new(Slot::Empty))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Return the live reporter, opening one for `config` on first use.
///
/// When a reporter is already live, `config` is ignored and nothing is
/// written. Once the report has been released it stays closed.
pub fn acquire(config: impl ReportConfig + 'static) -> Result<SharedReporter, ReportError> {
    let mut slot = registry();
    let existing = match &*slot {
        Slot::Empty => None,
        Slot::Live(weak) => Some(weak.upgrade()),
        Slot::Closed => return Err(ReportError::Closed),
    };
    match existing {
        Some(Some(live)) => {
            debug!("reusing live run report");
            Ok(live)
        }
        Some(None) => {
            *slot = Slot::Closed;
            Err(ReportError::Closed)
        }
        None => {
            let reporter = Arc::new(Mutex::new(RunReporter::open(config)?));
            *slot = Slot::Live(Arc::downgrade(&reporter));
            Ok(reporter)
        }
    }
}

/// Return the live reporter without opening one.
pub fn current() -> Option<SharedReporter> {
    match &*registry() {
        Slot::Live(weak) => weak.upgrade(),
        Slot::Empty | Slot::Closed => None,
    }
}

/// Whether the process-wide report has been produced and released.
pub fn is_closed() -> bool {
    match &*registry() {
        Slot::Live(weak) => weak.strong_count() == 0,
        Slot::Closed => true,
        Slot::Empty => false,
    }
}
