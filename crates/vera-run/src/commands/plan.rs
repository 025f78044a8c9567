use std::error::Error;

use clap::Args;
use tracing::warn;
use vera_bins::{generate_bins_with, BinSpec, StandardRelations};
use vera_sweep::{check_executables, plan_invocations, DryRunRunner, Runner, SweepLayout};

use super::options::ConfigArgs;

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

pub fn run(args: &PlanArgs) -> Result<(), Box<dyn Error>> {
    let config = args.config.resolve()?;
    if let Err(err) = check_executables(&config) {
        warn!(%err, "a real sweep would stop here");
    }
    let bins = generate_bins_with(&BinSpec::from_config(&config), &StandardRelations)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let layout = SweepLayout::new(&config.working_root);
    let mut runner = DryRunRunner::from_config(&config);
    for invocation in plan_invocations(&bins, &layout) {
        runner.simulate(&invocation.simulate_params(&config));
        runner.plot(&invocation.plot_params(&config));
    }
    for line in runner.lines() {
        println!("{line}");
    }
    Ok(())
}
