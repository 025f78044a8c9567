#![deny(missing_docs)]
#![doc = "Directory layout and external process orchestration for stellar-mass sweeps."]

/// Per (bin, variant) invocation parameters.
pub mod invocation;
/// Working directory tree.
pub mod layout;
/// The sweep loop.
pub mod orchestrator;
/// Audit report of every invocation.
pub mod report;
/// Process invocation capability.
pub mod runner;

pub use invocation::{PlotParams, RunInvocation, SimulateParams, MERGERS_FILE};
pub use layout::SweepLayout;
pub use orchestrator::{check_executables, execute, plan_invocations, run_sweep};
pub use report::{write_report, InvocationRecord, Step, SweepReport, REPORT_FILE};
pub use runner::{CommandLine, DryRunRunner, InvocationOutcome, Launcher, ProcessRunner, Runner};
pub use vera_bins::GalaxyType;
