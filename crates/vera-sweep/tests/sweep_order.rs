mod common;

use std::fs;

use common::{workspace, Call, RecordingRunner};
use vera_bins::generate_bins;
use vera_sweep::{execute, run_sweep, GalaxyType, Step, SweepLayout};

#[test]
fn three_bins_issue_four_calls_each_in_order() {
    let ws = workspace(1e9, 1e13, 3);
    let bins = generate_bins(1e9, 1e13, 3, ws.config.cluster_mass_ceiling).unwrap();
    let mut runner = RecordingRunner::default();
    let report = run_sweep(&bins, &ws.config, &mut runner).unwrap();

    assert_eq!(runner.calls.len(), 12);
    let layout = SweepLayout::new(&ws.config.working_root);
    for (bin_idx, bin) in bins.iter().enumerate() {
        let calls = &runner.calls[bin_idx * 4..bin_idx * 4 + 4];
        let early = layout.bin_dir(GalaxyType::Early, &bin.label);
        let late = layout.bin_dir(GalaxyType::Late, &bin.label);
        assert!(matches!(calls[0], Call::Simulate(_)));
        assert!(matches!(calls[1], Call::Plot(_)));
        assert!(matches!(calls[2], Call::Simulate(_)));
        assert!(matches!(calls[3], Call::Plot(_)));
        assert_eq!(calls[0].directory(), early);
        assert_eq!(calls[1].directory(), early);
        assert_eq!(calls[2].directory(), late);
        assert_eq!(calls[3].directory(), late);
        assert!(early.is_dir());
        assert!(late.is_dir());

        if let Call::Simulate(params) = &calls[0] {
            assert_eq!(params.mass_smbh, bin.smbh_mass);
            assert_eq!(params.cluster_mass, bin.early_cluster_mass);
        }
        if let Call::Simulate(params) = &calls[2] {
            assert_eq!(params.mass_smbh, bin.smbh_mass);
            assert_eq!(params.cluster_mass, bin.late_cluster_mass);
        }
        if let Call::Plot(params) = &calls[1] {
            assert_eq!(params.reference_dataset, ws.config.reference_dataset);
            assert!(params.mergers_file.ends_with("output_mergers_population.dat"));
        }
    }

    let steps: Vec<(GalaxyType, Step)> = report
        .invocations
        .iter()
        .take(4)
        .map(|record| (record.variant, record.step))
        .collect();
    assert_eq!(
        steps,
        [
            (GalaxyType::Early, Step::Simulate),
            (GalaxyType::Early, Step::Plot),
            (GalaxyType::Late, Step::Simulate),
            (GalaxyType::Late, Step::Plot),
        ]
    );
    assert_eq!(report.failure_count(), 0);
}

#[test]
fn directory_tree_matches_labels() {
    let ws = workspace(1e9, 1e13, 3);
    let mut runner = RecordingRunner::default();
    execute(&ws.config, &mut runner).unwrap();
    for variant in ["early", "late"] {
        let mut names: Vec<String> = fs::read_dir(ws.config.working_root.join(variant))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["11.00000000", "13.00000000", "9.00000000"]);
    }
}

#[test]
fn rerun_over_existing_tree_is_idempotent() {
    let ws = workspace(1e10, 1e12, 4);
    let mut first = RecordingRunner::default();
    let report_a = execute(&ws.config, &mut first).unwrap();
    let mut second = RecordingRunner::default();
    let report_b = execute(&ws.config, &mut second).unwrap();

    assert_eq!(first.calls, second.calls);
    assert_eq!(report_a.plan_hash, report_b.plan_hash);
    let early_entries = fs::read_dir(ws.config.working_root.join("early"))
        .unwrap()
        .count();
    assert_eq!(early_entries, 4);
}

#[test]
fn fixed_args_reach_every_simulation() {
    let mut ws = workspace(1e9, 1e11, 2);
    ws.config.simulator.n_iterations = 7;
    let mut runner = RecordingRunner::default();
    execute(&ws.config, &mut runner).unwrap();
    for call in &runner.calls {
        if let Call::Simulate(params) = call {
            assert!(params
                .fixed_args
                .contains(&("--n_iterations".to_string(), "7".to_string())));
            assert_eq!(params.fixed_args.len(), 5);
        }
    }
}
