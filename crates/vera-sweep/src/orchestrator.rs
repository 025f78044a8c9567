use std::collections::BTreeSet;

use tracing::{info, warn};
use vera_bins::{generate_bins_with, BinSpec, BinTable, GalaxyType, StandardRelations};
use vera_core::config::SweepConfig;
use vera_core::errors::{ErrorInfo, VeraError};
use vera_core::hash::{short_hash, stable_hash_string};

use crate::invocation::RunInvocation;
use crate::layout::SweepLayout;
use crate::report::{InvocationRecord, Step, SweepReport};
use crate::runner::{InvocationOutcome, Runner};

/// Fails with [`VeraError::MissingExecutable`] unless both tools are regular files.
pub fn check_executables(config: &SweepConfig) -> Result<(), VeraError> {
    for (role, path) in [
        ("simulator", &config.simulator_exe),
        ("plotter", &config.plotter_exe),
    ] {
        if !path.is_file() {
            return Err(VeraError::MissingExecutable(
                ErrorInfo::new(role, format!("{role} does not resolve to a file"))
                    .with_path("path", path),
            ));
        }
    }
    Ok(())
}

/// Every (bin, galaxy type) pair in sweep order: ascending bins, early before late.
pub fn plan_invocations(bins: &BinTable, layout: &SweepLayout) -> Vec<RunInvocation> {
    bins.iter()
        .flat_map(|bin| {
            GalaxyType::ALL
                .into_iter()
                .map(move |variant| RunInvocation::new(bin, variant, layout))
        })
        .collect()
}

/// Runs simulate-then-plot for every bin and both galaxy types, strictly in
/// order: ascending bins, early before late. Directory failures abort the
/// sweep; tool failures are recorded and the sweep moves on.
pub fn run_sweep<R: Runner + ?Sized>(
    bins: &BinTable,
    config: &SweepConfig,
    runner: &mut R,
) -> Result<SweepReport, VeraError> {
    check_executables(config)?;
    // Serializing the config also rejects non-UTF-8 paths, before anything touches disk.
    let plan_hash = stable_hash_string(&(bins, config))?;
    let layout = SweepLayout::new(&config.working_root);
    layout.ensure_root()?;
    info!(
        root = %layout.root().display(),
        bins = bins.len(),
        plan = short_hash(&plan_hash),
        "starting sweep"
    );

    let planned = plan_invocations(bins, &layout);
    let mut variant_dirs = BTreeSet::new();
    let mut invocations = Vec::with_capacity(planned.len() * 2);
    for invocation in &planned {
        if variant_dirs.insert(invocation.variant) {
            layout.ensure_variant_dir(invocation.variant)?;
        }
        layout.ensure_bin_dir(invocation.variant, &invocation.label)?;

        let params = invocation.simulate_params(config);
        let outcome = runner.simulate(&params);
        invocations.push(observe(invocation, Step::Simulate, params.args(), outcome));

        let params = invocation.plot_params(config);
        let outcome = runner.plot(&params);
        invocations.push(observe(invocation, Step::Plot, params.args(), outcome));
    }

    let report = SweepReport {
        plan_hash,
        working_root: layout.root().to_path_buf(),
        bins: bins.bins().to_vec(),
        invocations,
    };
    info!(
        invocations = report.invocations.len(),
        failures = report.failure_count(),
        "sweep finished"
    );
    Ok(report)
}

fn observe(
    invocation: &RunInvocation,
    step: Step,
    args: Vec<String>,
    outcome: InvocationOutcome,
) -> InvocationRecord {
    if outcome.success() {
        info!(variant = %invocation.variant, label = %invocation.label, ?step, %outcome, "done");
    } else {
        warn!(
            variant = %invocation.variant,
            label = %invocation.label,
            ?step,
            %outcome,
            "external tool failed; continuing"
        );
    }
    InvocationRecord {
        bin_index: invocation.bin_index,
        label: invocation.label.clone(),
        variant: invocation.variant,
        step,
        directory: invocation.directory.clone(),
        args,
        outcome,
    }
}

/// Validates `config`, generates its bins with the standard relations and runs the sweep.
pub fn execute<R: Runner + ?Sized>(
    config: &SweepConfig,
    runner: &mut R,
) -> Result<SweepReport, VeraError> {
    config.validate()?;
    let bins = generate_bins_with(&BinSpec::from_config(config), &StandardRelations)?;
    run_sweep(&bins, config, runner)
}

