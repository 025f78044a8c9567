use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vera_bins::{GalaxyType, MassBin};
use vera_core::errors::{ErrorInfo, VeraError};
use vera_core::serde::to_canonical_json_bytes;

use crate::runner::InvocationOutcome;

/// Report file written into the working root.
pub const REPORT_FILE: &str = "sweep_report.json";

/// Which of the two tools an invocation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Population synthesis run.
    Simulate,
    /// Plotting run.
    Plot,
}

/// One external invocation as issued by the sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRecord {
    /// Bin index.
    pub bin_index: usize,
    /// Bin label.
    pub label: String,
    /// Host galaxy type.
    pub variant: GalaxyType,
    /// Simulate or plot.
    pub step: Step,
    /// Invocation directory.
    pub directory: PathBuf,
    /// Tool arguments (without program and interpreter).
    pub args: Vec<String>,
    /// Observed outcome.
    pub outcome: InvocationOutcome,
}

/// Post-hoc audit trail of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Hash of the bins and configuration that drove the sweep.
    pub plan_hash: String,
    /// Working root of the sweep.
    pub working_root: PathBuf,
    /// Bins in processing order.
    pub bins: Vec<MassBin>,
    /// Invocations in issue order.
    pub invocations: Vec<InvocationRecord>,
}

impl SweepReport {
    /// Invocations that did not exit cleanly.
    pub fn failures(&self) -> impl Iterator<Item = &InvocationRecord> + '_ {
        self.invocations
            .iter()
            .filter(|record| !record.outcome.success())
    }

    /// Number of failed invocations.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Persists `report` as `<dir>/sweep_report.json` and returns the path written.
pub fn write_report(report: &SweepReport, dir: &Path) -> Result<PathBuf, VeraError> {
    let bytes = to_canonical_json_bytes(report)?;
    let path = dir.join(REPORT_FILE);
    fs::write(&path, bytes).map_err(|err| {
        VeraError::Serde(ErrorInfo::new("report_write", err.to_string()).with_path("path", &path))
    })?;
    Ok(path)
}
