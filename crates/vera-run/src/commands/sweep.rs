use std::error::Error;

use clap::Args;
use tracing::{info, warn};
use vera_core::save_config;
use vera_sweep::{execute, write_report, ProcessRunner};

use super::options::ConfigArgs;

/// Resolved configuration written next to the report for reproducibility.
const CONFIG_SNAPSHOT: &str = "sweep_config.yaml";

#[derive(Args, Debug)]
pub struct SweepArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Exit with an error after the sweep if any tool invocation failed.
    #[arg(long)]
    pub fail_on_error: bool,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    let mut runner = ProcessRunner::from_config(&config);
    let report = execute(&config, &mut runner).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let path = write_report(&report, &config.working_root)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    info!(report = %path.display(), "wrote sweep report");
    let snapshot = config.working_root.join(CONFIG_SNAPSHOT);
    save_config(&config, &snapshot).map_err(|err| Box::new(err) as Box<dyn Error>)?;

    let failures = report.failure_count();
    for record in report.failures() {
        warn!(
            variant = %record.variant,
            label = %record.label,
            step = ?record.step,
            outcome = %record.outcome,
            "failed invocation"
        );
    }
    println!(
        "{} invocations over {} bins, {} failed; report at {}",
        report.invocations.len(),
        report.bins.len(),
        failures,
        path.display()
    );
    if args.fail_on_error && failures > 0 {
        return Err(format!("{failures} invocation(s) failed").into());
    }
    Ok(())
}
