//! The shared reporter lives in a process-wide registry, so these checks run
//! in their own test binary and in a single test.

use anyhow::Result;
use qgate_report::ReportError;
use qgate_report::model::Setup;
use qgate_report::reporter::REPORT_FILE;
use qgate_report::shared;
use std::sync::Arc;
use tempfile::tempdir;

fn count(text: &str, needle: &str) -> usize {
    text.lines().filter(|l| l.starts_with(needle)).count()
}

fn setup_for(dir: &std::path::Path) -> Setup {
    Setup {
        model_output: dir.to_path_buf(),
        ..Setup::default()
    }
}

#[test]
fn test_shared_reporter_lifecycle() -> Result<()> {
    let first_dir = tempdir()?;
    let second_dir = tempdir()?;
    let report = first_dir.path().join(REPORT_FILE);
    assert!(shared::current().is_none());
    assert!(!shared::is_closed());

    let first = shared::acquire(setup_for(first_dir.path()))?;
    let second = shared::acquire(setup_for(second_dir.path()))?;

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!second_dir.path().join(REPORT_FILE).exists());
    let text = std::fs::read_to_string(&report)?;
    assert_eq!(count(&text, "# QGate version:"), 1);
    assert_eq!(count(&text, "# Host:"), 1);

    first.lock().unwrap().print("uc-101 done", "")?;
    drop(first);
    assert!(shared::current().is_some());
    drop(second);
    assert!(shared::current().is_none());
    assert!(shared::is_closed());

    let text = std::fs::read_to_string(&report)?;
    assert_eq!(count(&text, "# QGate version:"), 1);
    assert_eq!(count(&text, "# Host:"), 2);
    assert_eq!(count(&text, "uc-101 done"), 1);

    // The finished report is never reopened, for the same or another directory.
    let again = shared::acquire(setup_for(first_dir.path()));
    assert!(matches!(again, Err(ReportError::Closed)));
    let elsewhere = shared::acquire(setup_for(second_dir.path()));
    assert!(matches!(elsewhere, Err(ReportError::Closed)));
    assert!(!second_dir.path().join(REPORT_FILE).exists());

    let text = std::fs::read_to_string(&report)?;
    assert_eq!(count(&text, "# QGate version:"), 1);
    assert_eq!(count(&text, "uc-101 done"), 1);
    assert_eq!(count(&text, "# Host:"), 2);
    Ok(())
}
