//! Report rendering for aggregated benchmark results.
//!
//! Produces the human-readable text report and a JSON variant of the same
//! summary. Both are deterministic: problems appear in lexicographic order.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzers::types::{
    FieldSchema, GroupStats, MetricSpec, OverallStats, RunSummary, SkippedGroup, ValueKind,
};

const BANNER_WIDTH: usize = 80;

/// JSON envelope around one analysis run.
#[derive(Serialize)]
struct ReportEnvelope<'a> {
    generated_at: DateTime<Utc>,
    source: &'a str,
    overall: Option<OverallStats>,
    problems: &'a BTreeMap<String, GroupStats>,
    skipped: &'a [SkippedGroup],
}

/// Renders the full text report for one input file.
pub fn render_text(source: &str, summary: &RunSummary, schema: &FieldSchema) -> String {
    let mut out = String::new();
    let banner = "=".repeat(BANNER_WIDTH);

    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out, "pRRTC Performance Analysis: {source}");
    let _ = writeln!(out, "{banner}");

    let _ = writeln!(out, "\nOVERALL SUMMARY");
    let _ = writeln!(out, "{}", "-".repeat(40));
    match summary.overall(schema) {
        Ok(overall) => {
            let _ = writeln!(out, "Total test cases:    {}", overall.record_count);
            let _ = writeln!(
                out,
                "Total solved:        {} ({:.1}%)",
                overall.solved_count, overall.success_rate
            );
            let _ = writeln!(out, "Avg wall time:       {:.2} ms", overall.avg_wall_time_ms);
            match overall.avg_kernel_time_ms {
                Some(avg) => {
                    let _ = writeln!(out, "Avg GPU kernel time: {avg:.3} ms");
                }
                None => {
                    let _ = writeln!(out, "Avg GPU kernel time: no data");
                }
            }
            match overall.kernel_wall_ratio {
                Some(ratio) => {
                    let _ = writeln!(out, "Kernel/Wall ratio:   {ratio:.2}%");
                }
                None => {
                    let _ = writeln!(out, "Kernel/Wall ratio:   no data");
                }
            }
        }
        Err(e) => {
            let _ = writeln!(out, "{e}");
        }
    }

    let _ = writeln!(out, "\nPER-PROBLEM BREAKDOWN");
    let _ = writeln!(out, "{}", "-".repeat(BANNER_WIDTH));

    for (name, stats) in &summary.groups {
        let _ = writeln!(out, "\n{name}");
        let _ = writeln!(
            out,
            "   Tests: {} | Solved: {} ({:.0}%)",
            stats.record_count, stats.solved_count, stats.success_rate
        );
        for spec in &schema.metrics {
            let _ = writeln!(out, "{}", metric_line(spec, stats));
        }
    }

    if !summary.skipped.is_empty() {
        let _ = writeln!(out);
        for group in &summary.skipped {
            let _ = writeln!(
                out,
                "note: {} ({} records) omitted: no usable {} samples",
                group.name, group.record_count, schema.wall_label
            );
        }
    }

    let _ = writeln!(out, "\n{banner}");
    out
}

/// Formats one metric row of a problem block.
fn metric_line(spec: &MetricSpec, stats: &GroupStats) -> String {
    let title = format!("{}:", spec.title);
    let Some(m) = stats.metrics.get(&spec.label) else {
        return format!("   {title:<13}     no data");
    };

    let unit = if spec.unit.is_empty() {
        "  ".to_string()
    } else {
        format!(" {}", spec.unit)
    };

    match spec.kind {
        ValueKind::Float => format!(
            "   {title:<13}{mean:>8.p$}{unit}  (min: {min:.p$}, max: {max:.p$})",
            mean = m.mean,
            min = m.min,
            max = m.max,
            p = spec.precision,
        ),
        ValueKind::Integer => format!(
            "   {title:<13}{mean:>8.1}{unit}  (min: {min}, max: {max})",
            mean = m.mean,
            min = m.min as i64,
            max = m.max as i64,
        ),
    }
}

/// Renders the summary as pretty-printed JSON, stamped with the generation time.
pub fn render_json(source: &str, summary: &RunSummary, schema: &FieldSchema) -> Result<String> {
    let envelope = ReportEnvelope {
        generated_at: Utc::now(),
        source,
        overall: summary.overall(schema).ok(),
        problems: &summary.groups,
        skipped: &summary.skipped,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}
