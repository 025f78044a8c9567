#![cfg(unix)]

mod common;

use std::fs;

use common::workspace;
use vera_sweep::{execute, DryRunRunner, InvocationOutcome, ProcessRunner};

const SIMULATOR: &str = r#"
while [ $# -gt 0 ]; do
  if [ "$1" = "--work-directory" ]; then dir="$2"; fi
  shift
done
echo "simulate $dir" >> "$(dirname "$0")/calls.log"
touch "$dir/output_mergers_population.dat"
case "$dir" in
  */late/*) exit 3 ;;
esac
"#;

const PLOTTER: &str = r#"
echo "plot $2" >> "$(dirname "$0")/calls.log"
"#;

#[test]
fn real_processes_run_in_sweep_order() {
    let mut ws = workspace(1e9, 1e11, 2);
    fs::write(&ws.config.simulator_exe, SIMULATOR).unwrap();
    fs::write(&ws.config.plotter_exe, PLOTTER).unwrap();
    ws.config.interpreter = Some("sh".to_string());

    let mut runner = ProcessRunner::from_config(&ws.config);
    let report = execute(&ws.config, &mut runner).unwrap();

    let log = fs::read_to_string(ws.dir.path().join("calls.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 8);
    let root = ws.config.working_root.display().to_string();
    assert_eq!(lines[0], format!("simulate {root}/early/9.00000000"));
    assert_eq!(
        lines[1],
        format!("plot {root}/early/9.00000000/output_mergers_population.dat")
    );
    assert_eq!(lines[2], format!("simulate {root}/late/9.00000000"));
    assert_eq!(lines[7], format!("plot {root}/late/11.00000000/output_mergers_population.dat"));

    assert_eq!(report.failure_count(), 2);
    assert!(report
        .failures()
        .all(|record| record.outcome == InvocationOutcome::exited(3)));
    assert!(ws
        .config
        .working_root
        .join("early/11.00000000/output_mergers_population.dat")
        .is_file());
}

#[test]
fn unlaunchable_interpreter_is_recorded_not_fatal() {
    let mut ws = workspace(1e9, 1e11, 2);
    ws.config.interpreter = Some("/nonexistent/interpreter".to_string());
    let mut runner = ProcessRunner::from_config(&ws.config);
    let report = execute(&ws.config, &mut runner).unwrap();
    assert_eq!(report.invocations.len(), 8);
    assert_eq!(report.failure_count(), 8);
    assert!(matches!(
        report.invocations[0].outcome,
        InvocationOutcome::SpawnFailed { .. }
    ));
}

#[test]
fn dry_runner_records_full_command_lines() {
    let ws = workspace(1e9, 1e11, 2);
    let mut runner = DryRunRunner::from_config(&ws.config);
    let report = execute(&ws.config, &mut runner).unwrap();
    assert_eq!(report.failure_count(), 0);
    let lines = runner.lines();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0].program, "python3");
    assert_eq!(lines[0].args[0], ws.config.simulator_exe.display().to_string());
    assert_eq!(lines[1].args[0], ws.config.plotter_exe.display().to_string());
    assert!(lines[0].to_string().contains("--M_nsc"));
}
