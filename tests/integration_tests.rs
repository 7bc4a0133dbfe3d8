use std::path::Path;

use prrtc_analyzer::analyzers::aggregate::aggregate;
use prrtc_analyzer::analyzers::types::FieldSchema;
use prrtc_analyzer::loader::{load_records, read_records};
use prrtc_analyzer::report::render_text;

const FIXTURE: &str = include_str!("fixtures/panda_bench.csv");

#[test]
fn test_full_pipeline() {
    let records = read_records(FIXTURE.as_bytes()).expect("Failed to read fixture");
    assert_eq!(records.len(), 5);

    let schema = FieldSchema::default();
    let summary = aggregate(&records, &schema);

    // The baxter group has no parseable wall time and is set aside.
    assert_eq!(summary.groups.len(), 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].name, "baxter_crossed_arms");

    let bookshelf = &summary.groups["panda_bookshelf_tall"];
    assert_eq!(bookshelf.record_count, 2);
    assert_eq!(bookshelf.solved_count, 1);
    assert_eq!(bookshelf.success_rate, 50.0);
    assert_eq!(bookshelf.metrics["wall_time_ms"].mean, 2.0);
    assert_eq!(bookshelf.metrics["wall_time_ms"].min, 1.0);
    assert_eq!(bookshelf.metrics["wall_time_ms"].max, 3.0);

    // The malformed cost drops one sample without touching the others.
    let table_pick = &summary.groups["panda_table_pick"];
    assert_eq!(table_pick.record_count, 2);
    assert_eq!(table_pick.metrics["cost"].samples, 1);
    assert_eq!(table_pick.metrics["cost"].mean, 3.5);
    assert_eq!(table_pick.metrics["path_length"].samples, 2);

    let overall = summary.overall(&schema).expect("overall stats");
    assert_eq!(overall.record_count, 4);
    assert_eq!(overall.solved_count, 3);
    assert_eq!(overall.avg_wall_time_ms, 2.0);
    let ratio = overall.kernel_wall_ratio.expect("kernel data present");
    assert!((ratio - 22.5).abs() < 1e-9);

    let report = render_text("panda_bench.csv", &summary, &schema);
    assert!(report.contains("pRRTC Performance Analysis: panda_bench.csv"));
    assert!(report.contains("Total test cases:    4"));
    assert!(report.contains("panda_bookshelf_tall"));
    assert!(report.contains("note: baxter_crossed_arms (1 records) omitted"));
}

#[test]
fn test_load_records_from_fixture_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/panda_bench.csv");
    let records = load_records(&path).expect("Failed to load fixture");

    assert_eq!(records.len(), 5);
    assert_eq!(records[0]["problem_name"], "panda_bookshelf_tall");
    // Incidental whitespace around header names and values is stripped.
    assert_eq!(records[0]["wall_ns"], "1000000");
}
