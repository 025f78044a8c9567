//! Immutable run configuration for a stellar-mass sweep.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, VeraError};
use crate::serde::{from_yaml_slice, to_yaml_string};

/// Quantities passed to the plotter's `--cdf` flag when none are configured.
pub const DEFAULT_PLOT_QUANTITIES: [&str; 6] = ["chi_eff", "chi_p", "M", "gen1", "gen2", "t_merge"];

/// YAML-configurable parameters governing a sweep.
///
/// Built once at startup and passed by reference to both the bin generator and
/// the orchestrator; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Lowest galactic stellar mass in the sweep (solar masses).
    pub mass_min: f64,
    /// Highest galactic stellar mass in the sweep (solar masses).
    pub mass_max: f64,
    /// Number of log-spaced stellar mass bins.
    pub bin_count: usize,
    /// Upper limit applied to both nuclear star cluster masses (solar masses).
    pub cluster_mass_ceiling: f64,
    /// Fractional digits used when formatting bin labels.
    pub label_precision: usize,
    /// Top level working directory receiving `early/` and `late/` trees.
    pub working_root: PathBuf,
    /// Population synthesis simulator script.
    pub simulator_exe: PathBuf,
    /// Plotting script invoked on every simulator result.
    pub plotter_exe: PathBuf,
    /// Reference merger catalogue handed to the plotter.
    pub reference_dataset: PathBuf,
    /// Program used to launch both scripts; `None` executes them directly.
    pub interpreter: Option<String>,
    /// Simulator tuning knobs forwarded verbatim on every invocation.
    pub simulator: SimulatorKnobs,
    /// Quantities whose cumulative distributions the plotter renders.
    pub plot_quantities: Vec<String>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            mass_min: 1e9,
            mass_max: 1e13,
            bin_count: 9,
            cluster_mass_ceiling: 1e8,
            label_precision: 8,
            working_root: PathBuf::from("./run_many"),
            simulator_exe: PathBuf::from("./scripts/mcfacts_sim.py"),
            plotter_exe: PathBuf::from("./scripts/vera_plots.py"),
            reference_dataset: PathBuf::from("~/Repos/nal-data/GWTC-2.nal.hdf5"),
            interpreter: Some("python3".to_string()),
            simulator: SimulatorKnobs::default(),
            plot_quantities: DEFAULT_PLOT_QUANTITIES
                .iter()
                .map(|quantity| quantity.to_string())
                .collect(),
        }
    }
}

/// Tuning knobs shared by every simulator invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulatorKnobs {
    /// Number of timesteps (10,000 yr each).
    pub number_of_timesteps: u32,
    /// Number of iterations per mass bin.
    pub n_iterations: u32,
    /// Enables dynamical encounters.
    pub dynamics: bool,
    /// Hard limit on the simulator's internal bin occupancy.
    pub n_bins_max: u32,
    /// Log file name written inside each working directory.
    pub fname_log: String,
}

impl Default for SimulatorKnobs {
    fn default() -> Self {
        Self {
            number_of_timesteps: 100,
            n_iterations: 2,
            dynamics: false,
            n_bins_max: 10_000,
            fname_log: "out.log".to_string(),
        }
    }
}

fn config_error(code: &str, message: impl Into<String>) -> VeraError {
    VeraError::Config(ErrorInfo::new(code, message))
}

impl SweepConfig {
    /// Ordered flag/value pairs applied identically to every simulator run.
    pub fn simulator_fixed_args(&self) -> IndexMap<String, String> {
        let knobs = &self.simulator;
        let mut args = IndexMap::new();
        args.insert(
            "--number_of_timesteps".to_string(),
            knobs.number_of_timesteps.to_string(),
        );
        args.insert(
            "--dynamic_enc".to_string(),
            u8::from(knobs.dynamics).to_string(),
        );
        args.insert("--n_iterations".to_string(), knobs.n_iterations.to_string());
        args.insert("--n_bins_max".to_string(), knobs.n_bins_max.to_string());
        args.insert("--fname-log".to_string(), knobs.fname_log.clone());
        args
    }

    /// Checks ordering and positivity constraints on the sweep parameters.
    pub fn validate(&self) -> Result<(), VeraError> {
        validate_range(
            self.mass_min,
            self.mass_max,
            self.bin_count,
            self.cluster_mass_ceiling,
        )?;
        validate_label_precision(self.label_precision)?;
        if self.working_root.as_os_str().is_empty() {
            return Err(config_error("working_root", "working root must not be empty"));
        }
        if self.simulator.fname_log.is_empty() {
            return Err(config_error("fname_log", "simulator log name must not be empty"));
        }
        if self.plot_quantities.is_empty() {
            return Err(config_error(
                "plot_quantities",
                "at least one plot quantity is required",
            ));
        }
        // Paths travel through the report and the tools' argv as strings.
        for (key, path) in [
            ("working_root", &self.working_root),
            ("simulator_exe", &self.simulator_exe),
            ("plotter_exe", &self.plotter_exe),
            ("reference_dataset", &self.reference_dataset),
        ] {
            if path.to_str().is_none() {
                return Err(VeraError::Config(
                    ErrorInfo::new("non_utf8_path", format!("{key} is not valid UTF-8"))
                        .with_path(key, path),
                ));
            }
        }
        Ok(())
    }

    /// Returns a copy with `~` expanded and every path made absolute against `cwd`.
    pub fn resolve_paths(&self, cwd: &Path) -> SweepConfig {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let resolve = |path: &Path| absolutize(&expand_home(path, home.as_deref()), cwd);
        SweepConfig {
            working_root: resolve(&self.working_root),
            simulator_exe: resolve(&self.simulator_exe),
            plotter_exe: resolve(&self.plotter_exe),
            reference_dataset: resolve(&self.reference_dataset),
            ..self.clone()
        }
    }
}

/// Rejects mass ranges, bin counts and ceilings that cannot yield finite positive bins.
pub fn validate_range(
    mass_min: f64,
    mass_max: f64,
    bin_count: usize,
    ceiling: f64,
) -> Result<(), VeraError> {
    if !mass_min.is_finite() || mass_min <= 0.0 {
        return Err(VeraError::InvalidRange(
            ErrorInfo::new("mass_min", "minimum stellar mass must be positive and finite")
                .with_context("mass_min", mass_min.to_string()),
        ));
    }
    if !mass_max.is_finite() || mass_max <= mass_min {
        return Err(VeraError::InvalidRange(
            ErrorInfo::new("mass_max", "maximum stellar mass must exceed the minimum")
                .with_context("mass_min", mass_min.to_string())
                .with_context("mass_max", mass_max.to_string()),
        ));
    }
    if bin_count == 0 {
        return Err(VeraError::invalid_range(
            "bin_count",
            "at least one bin is required",
        ));
    }
    if !ceiling.is_finite() || ceiling <= 0.0 {
        return Err(VeraError::InvalidRange(
            ErrorInfo::new("ceiling", "cluster mass ceiling must be positive and finite")
                .with_context("ceiling", ceiling.to_string()),
        ));
    }
    Ok(())
}

/// Largest accepted label precision; an f64 carries no digits beyond it.
pub const MAX_LABEL_PRECISION: usize = 17;

/// Rejects label precisions outside `1..=MAX_LABEL_PRECISION`.
pub fn validate_label_precision(precision: usize) -> Result<(), VeraError> {
    if (1..=MAX_LABEL_PRECISION).contains(&precision) {
        return Ok(());
    }
    Err(VeraError::InvalidRange(
        ErrorInfo::new(
            "label_precision",
            format!("label precision must lie in 1..={MAX_LABEL_PRECISION}"),
        )
        .with_context("label_precision", precision.to_string()),
    ))
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    // Drop `.` components so labels and report paths stay readable.
    joined
        .components()
        .filter(|component| !matches!(component, std::path::Component::CurDir))
        .collect()
}

/// Reads a sweep configuration from a YAML file without validating it, so
/// callers can layer overrides before [`SweepConfig::validate`].
pub fn parse_config(path: &Path) -> Result<SweepConfig, VeraError> {
    let bytes = fs::read(path).map_err(|err| {
        VeraError::Config(ErrorInfo::new("config_read", err.to_string()).with_path("path", path))
    })?;
    from_yaml_slice(&bytes)
}

/// Loads a sweep configuration from a YAML file and validates it.
pub fn load_config(path: &Path) -> Result<SweepConfig, VeraError> {
    let config = parse_config(path)?;
    config.validate()?;
    Ok(config)
}

/// Writes `config` as YAML to `path`.
pub fn save_config(config: &SweepConfig, path: &Path) -> Result<(), VeraError> {
    let text = to_yaml_string(config)?;
    fs::write(path, text).map_err(|err| {
        VeraError::Config(ErrorInfo::new("config_write", err.to_string()).with_path("path", path))
    })
}
