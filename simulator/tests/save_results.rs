use guardchannel::{AveragedStats, GuardOutcome};
use simulator::config::ModelConfig;
use simulator::save_results::{csv_row, write_csv};
use simulator::{ResultWriter, SimulatorConfig, SweepRecord, SweepResults};
use std::fs;
use std::time::Duration;

fn results() -> SweepResults {
    let model = ModelConfig::default();
    let stats = AveragedStats { loss: 1e-6, wait_avg: 0.5, wait_max: 2.0, urllc_tot: 100.0, urllc_max: 8.0, embb_tot: 20.0 };
    let records = vec![
        SweepRecord::from_outcome(0.0, &GuardOutcome::Found { guard: 1, stats }, 10, &model),
        SweepRecord::from_outcome(5.0, &GuardOutcome::Infeasible { last_guard: 9, stats }, 10, &model),
    ];
    SweepResults { capacity: 10, base_seed: 3, num_workers: 2, records, elapsed: Duration::from_secs(3723) }
}

#[test]
fn csv_has_header_and_rows_in_order() {
    let mut out = Vec::new();
    write_csv(&mut out, &results()).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "E;G;LoadE;PerG;Loss;WaitAvg;WaitMax;URLLC_Tot;URLLC_Max;eMBB_Tot;Horizon;;# 1 hrs 2 mins 3 s"
    );
    assert!(lines[1].starts_with("0;1;0.000000;10.000000;0.000001;0.500000;"));
    assert!(lines[2].starts_with("5;NA;NA;NA;"));
    assert!(lines[2].ends_with(";"));
}

#[test]
fn horizon_column_uses_load() {
    let row = csv_row(&results().records[0]);
    assert!(row.ends_with(";100.000000;"), "{}", row);
}

#[test]
fn writer_creates_both_files() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let writer = ResultWriter::create(&out_dir, 10).unwrap();
    let csv_path = writer.csv_path().to_path_buf();
    let json_path = writer.json_path().to_path_buf();
    assert!(csv_path.ends_with("S(10).csv"));

    writer.write(&results(), &SimulatorConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(&csv_path).unwrap().lines().count(), 3);
    let summary: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(summary["sweep_summary"]["num_points"], 2);
    assert_eq!(summary["sweep_summary"]["infeasible_points"], 1);
    assert_eq!(summary["individual_results"][1]["guard"], serde_json::Value::Null);
    assert_eq!(summary["individual_results"][0]["guard"], 1);
}

#[test]
fn unwritable_destination_fails_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    fs::write(&blocker, b"x").unwrap();
    assert!(ResultWriter::create(&blocker, 10).is_err());
}

#[test]
fn dropped_writer_keeps_previous_results() {
    let dir = tempfile::tempdir().unwrap();
    let previous = "0;1;previous run data\n";
    fs::write(dir.path().join("S(5).csv"), previous).unwrap();

    let writer = ResultWriter::create(dir.path(), 5).unwrap();
    drop(writer);

    assert_eq!(fs::read_to_string(dir.path().join("S(5).csv")).unwrap(), previous);
}

#[test]
fn write_replaces_longer_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("S(10).csv");
    fs::write(&csv_path, "stale\n".repeat(500)).unwrap();

    let writer = ResultWriter::create(dir.path(), 10).unwrap();
    writer.write(&results(), &SimulatorConfig::default()).unwrap();

    let text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("stale"));
}
