use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vera_bins::{GalaxyType, MassBin};
use vera_core::config::SweepConfig;

use crate::layout::SweepLayout;

/// File the simulator writes into its working directory and the plotter reads.
pub const MERGERS_FILE: &str = "output_mergers_population.dat";

/// One (bin, galaxy type) unit of work. Owns its directory exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInvocation {
    /// Host galaxy type.
    pub variant: GalaxyType,
    /// Index of the bin in the sweep.
    pub bin_index: usize,
    /// Directory label of the bin.
    pub label: String,
    /// `<root>/<variant>/<label>`.
    pub directory: PathBuf,
    /// Black hole mass handed to the simulator.
    pub mass_smbh: f64,
    /// Clamped cluster mass for this variant.
    pub cluster_mass: f64,
}

impl RunInvocation {
    /// Builds the invocation for `bin` hosted by a `variant` galaxy.
    pub fn new(bin: &MassBin, variant: GalaxyType, layout: &SweepLayout) -> Self {
        Self {
            variant,
            bin_index: bin.index,
            label: bin.label.clone(),
            directory: layout.bin_dir(variant, &bin.label),
            mass_smbh: bin.smbh_mass,
            cluster_mass: bin.cluster_mass(variant),
        }
    }

    /// Simulator arguments for this invocation.
    pub fn simulate_params(&self, config: &SweepConfig) -> SimulateParams {
        SimulateParams {
            fixed_args: config.simulator_fixed_args().into_iter().collect(),
            work_directory: self.directory.clone(),
            mass_smbh: self.mass_smbh,
            cluster_mass: self.cluster_mass,
        }
    }

    /// Plotter arguments for this invocation.
    pub fn plot_params(&self, config: &SweepConfig) -> PlotParams {
        PlotParams {
            mergers_file: self.directory.join(MERGERS_FILE),
            reference_dataset: config.reference_dataset.clone(),
            quantities: config.plot_quantities.clone(),
        }
    }
}

/// Everything the simulator receives on its command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateParams {
    /// Flags shared by every run, in configuration order.
    pub fixed_args: Vec<(String, String)>,
    /// Directory the simulator writes into.
    pub work_directory: PathBuf,
    /// Black hole mass.
    pub mass_smbh: f64,
    /// Nuclear star cluster mass (`--M_nsc`).
    pub cluster_mass: f64,
}

impl SimulateParams {
    /// `<fixed flags> --work-directory DIR --mass_smbh M --M_nsc M`.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.fixed_args.len() * 2 + 6);
        for (flag, value) in &self.fixed_args {
            args.push(flag.clone());
            args.push(value.clone());
        }
        args.push("--work-directory".to_string());
        args.push(self.work_directory.display().to_string());
        args.push("--mass_smbh".to_string());
        args.push(format!("{:.6}", self.mass_smbh));
        args.push("--M_nsc".to_string());
        args.push(format!("{:.6}", self.cluster_mass));
        args
    }
}

/// Everything the plotter receives on its command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotParams {
    /// Simulator output inside the invocation directory.
    pub mergers_file: PathBuf,
    /// External catalogue the populations are compared against.
    pub reference_dataset: PathBuf,
    /// Quantities passed to `--cdf`.
    pub quantities: Vec<String>,
}

impl PlotParams {
    /// `--fname-mergers FILE --fname-nal FILE --cdf Q...`.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--fname-mergers".to_string(),
            self.mergers_file.display().to_string(),
            "--fname-nal".to_string(),
            self.reference_dataset.display().to_string(),
            "--cdf".to_string(),
        ];
        args.extend(self.quantities.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bin() -> MassBin {
        MassBin {
            index: 2,
            stellar_mass: 1e11,
            smbh_mass: 1.5e8,
            early_cluster_mass: 4.0e7,
            late_cluster_mass: 1.0e8,
            label: "11.00000000".to_string(),
        }
    }

    #[test]
    fn simulator_args_end_with_directory_and_masses() {
        let config = SweepConfig::default();
        let layout = SweepLayout::new("/runs");
        let invocation = RunInvocation::new(&sample_bin(), GalaxyType::Late, &layout);
        let args = invocation.simulate_params(&config).args();
        assert_eq!(args[0], "--number_of_timesteps");
        assert_eq!(args[1], "100");
        let tail = &args[args.len() - 6..];
        assert_eq!(
            tail,
            [
                "--work-directory",
                "/runs/late/11.00000000",
                "--mass_smbh",
                "150000000.000000",
                "--M_nsc",
                "100000000.000000",
            ]
        );
    }

    #[test]
    fn plot_args_point_at_the_mergers_file() {
        let config = SweepConfig {
            reference_dataset: PathBuf::from("/data/GWTC-2.nal.hdf5"),
            ..SweepConfig::default()
        };
        let layout = SweepLayout::new("/runs");
        let invocation = RunInvocation::new(&sample_bin(), GalaxyType::Early, &layout);
        assert_eq!(invocation.cluster_mass, 4.0e7);
        let args = invocation.plot_params(&config).args();
        assert_eq!(
            args,
            [
                "--fname-mergers",
                "/runs/early/11.00000000/output_mergers_population.dat",
                "--fname-nal",
                "/data/GWTC-2.nal.hdf5",
                "--cdf",
                "chi_eff",
                "chi_p",
                "M",
                "gen1",
                "gen2",
                "t_merge",
            ]
        );
    }
}
