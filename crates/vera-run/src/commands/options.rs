use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use vera_core::{parse_config, SweepConfig};

/// Configuration file plus command line overrides shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConfigArgs {
    /// YAML file describing the sweep; built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Minimum galactic stellar mass.
    #[arg(long = "mstar-min")]
    pub mstar_min: Option<f64>,
    /// Maximum galactic stellar mass.
    #[arg(long = "mstar-max")]
    pub mstar_max: Option<f64>,
    /// Number of stellar mass bins.
    #[arg(long)]
    pub nbins: Option<usize>,
    /// Top level working directory.
    #[arg(long)]
    pub wkdir: Option<PathBuf>,
    /// Path to the simulator script.
    #[arg(long = "mcfacts-exe")]
    pub mcfacts_exe: Option<PathBuf>,
    /// Path to the plotting script.
    #[arg(long = "vera-plots-exe")]
    pub vera_plots_exe: Option<PathBuf>,
    /// Reference merger catalogue handed to the plotter.
    #[arg(long = "fname-nal")]
    pub fname_nal: Option<PathBuf>,
    /// Maximum nuclear star cluster mass (solar masses).
    #[arg(long = "max-nsc-mass")]
    pub max_nsc_mass: Option<f64>,
    /// Number of timesteps (10,000 yr each).
    #[arg(long = "number-of-timesteps", alias = "number_of_timesteps")]
    pub number_of_timesteps: Option<u32>,
    /// Enable dynamical encounters in the simulator.
    #[arg(long)]
    pub dynamics: bool,
    /// Number of iterations per mass bin.
    #[arg(long = "n-iterations", alias = "n_iterations")]
    pub n_iterations: Option<u32>,
    /// Fractional digits in bin directory labels.
    #[arg(long = "label-precision")]
    pub label_precision: Option<usize>,
    /// Program used to launch both scripts.
    #[arg(long, conflicts_with = "no_interpreter")]
    pub interpreter: Option<String>,
    /// Execute the scripts directly instead of through an interpreter.
    #[arg(long = "no-interpreter")]
    pub no_interpreter: bool,
}

impl ConfigArgs {
    /// Loads the file (or defaults), applies overrides, validates and makes paths absolute.
    pub fn resolve(&self) -> Result<SweepConfig, Box<dyn Error>> {
        let base = match &self.config {
            Some(path) => parse_config(path)?,
            None => SweepConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config.resolve_paths(&std::env::current_dir()?))
    }

    fn apply(&self, mut config: SweepConfig) -> SweepConfig {
        if let Some(value) = self.mstar_min {
            config.mass_min = value;
        }
        if let Some(value) = self.mstar_max {
            config.mass_max = value;
        }
        if let Some(value) = self.nbins {
            config.bin_count = value;
        }
        if let Some(value) = &self.wkdir {
            config.working_root = value.clone();
        }
        if let Some(value) = &self.mcfacts_exe {
            config.simulator_exe = value.clone();
        }
        if let Some(value) = &self.vera_plots_exe {
            config.plotter_exe = value.clone();
        }
        if let Some(value) = &self.fname_nal {
            config.reference_dataset = value.clone();
        }
        if let Some(value) = self.max_nsc_mass {
            config.cluster_mass_ceiling = value;
        }
        if let Some(value) = self.number_of_timesteps {
            config.simulator.number_of_timesteps = value;
        }
        if self.dynamics {
            config.simulator.dynamics = true;
        }
        if let Some(value) = self.n_iterations {
            config.simulator.n_iterations = value;
        }
        if let Some(value) = self.label_precision {
            config.label_precision = value;
        }
        if let Some(value) = &self.interpreter {
            config.interpreter = Some(value.clone());
        }
        if self.no_interpreter {
            config.interpreter = None;
        }
        config
    }
}
