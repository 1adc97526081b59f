//! End-to-end scenarios over log files on disk

mod common;

use common::{LogFixture, COMMUTING_IR, RACING_TRACE};
use dfrace_engine::features::conflict_detection::ConflictKind;
use dfrace_engine::{Analyzer, DetectorError};
use pretty_assertions::assert_eq;

fn run(fixture: &LogFixture) -> Analyzer {
    let mut analyzer = Analyzer::new(fixture.config());
    analyzer
        .run(&fixture.trace_log, &fixture.hb_log, &fixture.ir_log)
        .unwrap();
    analyzer
}

#[test]
fn test_unordered_divergent_writes_reported() {
    let fixture = LogFixture::new(RACING_TRACE, "", "");
    let analyzer = run(&fixture);

    let table = analyzer.conflict_table();
    assert_eq!(table.len(), 1);
    let report = table.get("consumer", "producer").unwrap();
    let conflict = report.conflicts.iter().next().unwrap();
    assert_eq!(conflict.address, 0x7ffd1000);
    assert_eq!(conflict.line_pair(), (7, 5));
    assert_eq!(conflict.kind, ConflictKind::WriteWrite);

    let text = analyzer.render_report();
    assert!(text.contains("Tasks: 2"));
    assert!(text.contains("Conflicting task pairs: 1"));
    assert!(text.contains("0x7ffd1000"));
}

#[test]
fn test_ordered_writes_not_reported() {
    // producer (10) happens before consumer (20)
    let fixture = LogFixture::new(RACING_TRACE, "20 10\n", "");
    let analyzer = run(&fixture);

    assert!(analyzer.happens_before().happens_before(10, 20));
    assert!(analyzer.conflict_table().is_empty());
}

#[test]
fn test_identical_writes_not_reported() {
    let trace = "\
1 F update
10 B producer
20 B consumer
10 W 0x7ffd1000 42 5 1
20 W 0x7ffd1000 42 7 1
";
    let fixture = LogFixture::new(trace, "", "");
    assert!(run(&fixture).conflict_table().is_empty());
}

#[test]
fn test_commuting_stores_eliminated() {
    let fixture = LogFixture::new(RACING_TRACE, "", COMMUTING_IR);
    let analyzer = run(&fixture);

    assert!(analyzer.conflict_table().is_empty());
    let stats = analyzer.stats();
    assert_eq!(stats.raw_conflicts, 1);
    assert_eq!(stats.eliminated_conflicts, 1);
    assert_eq!(stats.remaining_conflicts, 0);
    assert_eq!(stats.ir_listings, 2);
}

#[test]
fn test_escaping_call_keeps_conflict() {
    let ir = "\
producer
5: %x = alloca i32, align 4
5: call void @publish(i32* %x)
5: %y = add nsw i32 %x, 1
5: store i32 %y, i32* %x, align 4
consumer
7: %x = alloca i32, align 4
7: %y = add nsw i32 %x, 1
7: store i32 %y, i32* %x, align 4
";
    let fixture = LogFixture::new(RACING_TRACE, "", ir);
    let analyzer = run(&fixture);

    assert_eq!(analyzer.conflict_table().conflict_count(), 1);
    assert_eq!(analyzer.stats().eliminated_conflicts, 0);
}

#[test]
fn test_validation_can_be_disabled() {
    let fixture = LogFixture::new(RACING_TRACE, "", COMMUTING_IR);
    let mut config = fixture.config();
    config.validate = false;

    let mut analyzer = Analyzer::new(config);
    analyzer
        .run(&fixture.trace_log, &fixture.hb_log, &fixture.ir_log)
        .unwrap();

    assert_eq!(analyzer.conflict_table().conflict_count(), 1);
}

#[test]
fn test_fan_out_parent_bag_released_after_last_child() {
    // A(1) → B(2), A(1) → C(3)
    let hb = "2 1\n3 1\n";
    let trace = "1 B A\n2 B B\n";
    let fixture = LogFixture::new(trace, hb, "");

    let mut analyzer = Analyzer::new(fixture.config());
    analyzer.ingest_hb_log(&fixture.hb_log).unwrap();
    analyzer.ingest_trace_log(&fixture.trace_log).unwrap();

    let hb = analyzer.happens_before();
    assert_eq!(hb.bag(2).unwrap().out_buffer_count, 0);
    assert_eq!(hb.bag(1).unwrap().out_buffer_count, 1);

    let source = std::path::Path::new("<memory>");
    analyzer
        .ingest_trace_reader(std::io::Cursor::new("3 B C\n"), source)
        .unwrap();

    let hb = analyzer.happens_before();
    assert!(hb.bag(1).is_none());
    assert!(hb.bag(3).unwrap().contains(1));
    assert!(hb.bag(2).unwrap().contains(1));
}

#[test]
fn test_graph_dumps_written() {
    let fixture = LogFixture::new("1 B root\n2 B left\n3 B right\n", "2 1\n3 1\n", "");
    let analyzer = run(&fixture);
    let output = &analyzer.config().graph_output;

    let edges = std::fs::read_to_string(output.edge_list_path()).unwrap();
    assert_eq!(edges, "1 2\n1 3\n");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output.json_path()).unwrap()).unwrap();
    let names: Vec<&str> = json["nodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["root", "left", "right"]);
}

#[test]
fn test_missing_input_is_io_error() {
    let fixture = LogFixture::new("", "", "");
    let mut analyzer = Analyzer::new(fixture.config());
    let missing = fixture.dir.path().join("absent.log");

    let err = analyzer
        .run(&fixture.trace_log, &missing, &fixture.ir_log)
        .unwrap_err();

    match err {
        DetectorError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_ir_log_fails_before_analysis() {
    let fixture = LogFixture::new(RACING_TRACE, "20 10\n", "");
    let mut analyzer = Analyzer::new(fixture.config());
    let missing = fixture.dir.path().join("missing_ir.log");

    let err = analyzer
        .run(&fixture.trace_log, &fixture.hb_log, &missing)
        .unwrap_err();

    match err {
        DetectorError::Io { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    let stats = analyzer.stats();
    assert_eq!(stats.hb_edges, 0);
    assert_eq!(stats.trace_lines, 0);
    assert_eq!(stats.memory_records, 0);
    assert_eq!(stats.raw_conflicts, 0);
    assert!(!analyzer.config().graph_output.edge_list_path().exists());
}

#[test]
fn test_read_after_concurrent_write_reported() {
    let trace = "\
1 F reader_fn
2 F writer_fn
10 B reader
20 B writer
10 R 0x40 0 3 1
20 W 0x40 9 8 2
";
    let fixture = LogFixture::new(trace, "", "");
    let analyzer = run(&fixture);

    let report = analyzer.conflict_table().get("writer", "reader").unwrap();
    let conflict = report.conflicts.iter().next().unwrap();
    assert_eq!(conflict.kind, ConflictKind::WriteRead);
    assert!(analyzer
        .render_report()
        .contains("W line 8 in writer_fn (wrote=9) vs R line 3 in reader_fn (read=0)"));
}

#[test]
fn test_first_action_with_trailing_last_write() {
    // Task 10 reads then writes 5; task 20 writes 5: the final values agree
    let trace = "\
1 F f
10 B a
20 B b
10 R 0x40 0 3 1 :: 10 W 0x40 5 4 1
20 W 0x40 5 9 1
";
    let fixture = LogFixture::new(trace, "", "");
    assert!(run(&fixture).conflict_table().is_empty());
}

#[cfg(unix)]
#[test]
fn test_cli_usage_error_exits_minus_one() {
    let status = std::process::Command::new(env!("CARGO_BIN_EXE_dfrace"))
        .arg("only-one-arg")
        .output()
        .unwrap()
        .status;
    assert_eq!(status.code(), Some(255));
}

#[cfg(unix)]
#[test]
fn test_cli_prints_report() {
    let fixture = LogFixture::new(RACING_TRACE, "", "");
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_dfrace"))
        .current_dir(fixture.dir.path())
        .args([&fixture.trace_log, &fixture.hb_log, &fixture.ir_log])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Conflicting task pairs: 1"));
    assert!(stdout.contains("Execution time:"));
    assert!(fixture.dir.path().join("dependency_graph.json").exists());
}

#[cfg(unix)]
#[test]
fn test_cli_missing_config_names_file() {
    let fixture = LogFixture::new(RACING_TRACE, "", "");
    let config = fixture.dir.path().join("absent.yaml");
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_dfrace"))
        .current_dir(fixture.dir.path())
        .args([&fixture.trace_log, &fixture.hb_log, &fixture.ir_log])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(255));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.yaml"));
}
