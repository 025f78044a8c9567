#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vera_core::SweepConfig;
use vera_sweep::{InvocationOutcome, PlotParams, Runner, SimulateParams};

/// A call observed by [`RecordingRunner`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Simulate(SimulateParams),
    Plot(PlotParams),
}

impl Call {
    pub fn directory(&self) -> PathBuf {
        match self {
            Call::Simulate(params) => params.work_directory.clone(),
            Call::Plot(params) => params
                .mergers_file
                .parent()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }

    pub fn is_simulate(&self) -> bool {
        matches!(self, Call::Simulate(_))
    }
}

/// Fake runner that records every call and answers with scripted exit codes.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<Call>,
    /// Exit codes returned for successive simulate calls; zero once exhausted.
    pub simulate_codes: Vec<i32>,
}

impl RecordingRunner {
    pub fn failing_simulations(codes: &[i32]) -> Self {
        Self {
            calls: Vec::new(),
            simulate_codes: codes.to_vec(),
        }
    }
}

impl Runner for RecordingRunner {
    fn simulate(&mut self, params: &SimulateParams) -> InvocationOutcome {
        let index = self.calls.iter().filter(|call| call.is_simulate()).count();
        self.calls.push(Call::Simulate(params.clone()));
        InvocationOutcome::exited(self.simulate_codes.get(index).copied().unwrap_or(0))
    }

    fn plot(&mut self, params: &PlotParams) -> InvocationOutcome {
        self.calls.push(Call::Plot(params.clone()));
        InvocationOutcome::exited(0)
    }
}

/// Temporary workspace holding placeholder tool scripts and a working root.
pub struct Workspace {
    pub dir: TempDir,
    pub config: SweepConfig,
}

pub fn workspace(mass_min: f64, mass_max: f64, bin_count: usize) -> Workspace {
    let dir = tempfile::tempdir().expect("tmp dir");
    let simulator = dir.path().join("mcfacts_sim.py");
    let plotter = dir.path().join("vera_plots.py");
    fs::write(&simulator, "# simulator\n").expect("write simulator");
    fs::write(&plotter, "# plotter\n").expect("write plotter");
    let config = SweepConfig {
        mass_min,
        mass_max,
        bin_count,
        working_root: dir.path().join("run_many"),
        simulator_exe: simulator,
        plotter_exe: plotter,
        reference_dataset: dir.path().join("GWTC-2.nal.hdf5"),
        ..SweepConfig::default()
    };
    Workspace { dir, config }
}
