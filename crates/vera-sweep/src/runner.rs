use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::info;
use vera_core::config::SweepConfig;

use crate::invocation::{PlotParams, SimulateParams};

/// Observed result of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum InvocationOutcome {
    /// The process ran to completion. `code` is `None` when killed by a signal.
    Exited {
        /// Exit code reported by the operating system.
        code: Option<i32>,
    },
    /// The process could not be started.
    SpawnFailed {
        /// Operating system error.
        error: String,
    },
    /// Nothing was executed.
    DryRun,
}

impl InvocationOutcome {
    /// Outcome for a process that exited with `code`.
    pub fn exited(code: i32) -> Self {
        InvocationOutcome::Exited { code: Some(code) }
    }

    /// True for a zero exit code or a dry run.
    pub fn success(&self) -> bool {
        matches!(
            self,
            InvocationOutcome::Exited { code: Some(0) } | InvocationOutcome::DryRun
        )
    }
}

impl fmt::Display for InvocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationOutcome::Exited { code: Some(code) } => write!(f, "exit code {code}"),
            InvocationOutcome::Exited { code: None } => f.write_str("terminated by signal"),
            InvocationOutcome::SpawnFailed { error } => write!(f, "spawn failed: {error}"),
            InvocationOutcome::DryRun => f.write_str("dry run"),
        }
    }
}

/// Capability to launch the two external tools. The sweep only observes the
/// returned outcome; it never retries or aborts on a failed invocation.
pub trait Runner {
    /// Runs the population synthesis simulator and waits for it to finish.
    fn simulate(&mut self, params: &SimulateParams) -> InvocationOutcome;

    /// Runs the plotting tool and waits for it to finish.
    fn plot(&mut self, params: &PlotParams) -> InvocationOutcome;
}

/// Fully rendered program and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandLine {
    /// Program handed to the operating system.
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Converts into a blocking [`Command`] inheriting stdio.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Renders simulator and plotter command lines, optionally behind an interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    interpreter: Option<String>,
    simulator: PathBuf,
    plotter: PathBuf,
}

impl Launcher {
    /// Launcher for the executables named in `config`.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            simulator: config.simulator_exe.clone(),
            plotter: config.plotter_exe.clone(),
        }
    }

    /// Simulator command line for `params`.
    pub fn simulate_line(&self, params: &SimulateParams) -> CommandLine {
        self.line(&self.simulator, params.args())
    }

    /// Plotter command line for `params`.
    pub fn plot_line(&self, params: &PlotParams) -> CommandLine {
        self.line(&self.plotter, params.args())
    }

    fn line(&self, exe: &std::path::Path, tool_args: Vec<String>) -> CommandLine {
        let exe = exe.display().to_string();
        match &self.interpreter {
            Some(interpreter) => {
                let mut args = Vec::with_capacity(tool_args.len() + 1);
                args.push(exe);
                args.extend(tool_args);
                CommandLine {
                    program: interpreter.clone(),
                    args,
                }
            }
            None => CommandLine {
                program: exe,
                args: tool_args,
            },
        }
    }
}

/// Runs the tools as blocking child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    launcher: Launcher,
}

impl ProcessRunner {
    /// Runner for the executables named in `config`.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            launcher: Launcher::from_config(config),
        }
    }

    fn run(&self, line: CommandLine) -> InvocationOutcome {
        info!(command = %line, "launching");
        match line.to_command().status() {
            Ok(status) => InvocationOutcome::Exited {
                code: status.code(),
            },
            Err(err) => InvocationOutcome::SpawnFailed {
                error: err.to_string(),
            },
        }
    }
}

impl Runner for ProcessRunner {
    fn simulate(&mut self, params: &SimulateParams) -> InvocationOutcome {
        self.run(self.launcher.simulate_line(params))
    }

    fn plot(&mut self, params: &PlotParams) -> InvocationOutcome {
        self.run(self.launcher.plot_line(params))
    }
}

/// Records the command lines a sweep would issue without running anything.
#[derive(Debug, Clone)]
pub struct DryRunRunner {
    launcher: Launcher,
    lines: Vec<CommandLine>,
}

impl DryRunRunner {
    /// Dry runner for the executables named in `config`.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            launcher: Launcher::from_config(config),
            lines: Vec::new(),
        }
    }

    /// Command lines recorded so far, in issue order.
    pub fn lines(&self) -> &[CommandLine] {
        &self.lines
    }

    fn record(&mut self, line: CommandLine) -> InvocationOutcome {
        info!(command = %line, "dry run");
        self.lines.push(line);
        InvocationOutcome::DryRun
    }
}

impl Runner for DryRunRunner {
    fn simulate(&mut self, params: &SimulateParams) -> InvocationOutcome {
        let line = self.launcher.simulate_line(params);
        self.record(line)
    }

    fn plot(&mut self, params: &PlotParams) -> InvocationOutcome {
        let line = self.launcher.plot_line(params);
        self.record(line)
    }
}
