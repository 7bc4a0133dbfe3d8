//! Data types used by the aggregation pipeline.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Nanoseconds per millisecond, the divisor applied to planner timings.
pub const NS_PER_MS: f64 = 1_000_000.0;

/// Numeric representation expected for a CSV field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Integer,
}

/// Maps one CSV column onto one tracked metric.
#[derive(Debug, Clone)]
pub struct MetricSpec {
    /// CSV column the values come from.
    pub field: String,
    /// Metric name in summaries, e.g. `wall_time_ms`.
    pub label: String,
    /// Row title in the text report, e.g. `Wall Time`.
    pub title: String,
    pub kind: ValueKind,
    /// Raw values are divided by this before entering the series.
    pub divisor: f64,
    /// Unit suffix shown in the report, empty for dimensionless metrics.
    pub unit: String,
    /// Decimal places used when rendering this metric.
    pub precision: usize,
}

impl MetricSpec {
    pub fn float(
        field: &str,
        label: &str,
        title: &str,
        divisor: f64,
        unit: &str,
        precision: usize,
    ) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            title: title.to_string(),
            kind: ValueKind::Float,
            divisor,
            unit: unit.to_string(),
            precision,
        }
    }

    pub fn integer(field: &str, label: &str, title: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
            title: title.to_string(),
            kind: ValueKind::Integer,
            divisor: 1.0,
            unit: String::new(),
            precision: 1,
        }
    }
}

/// Field-name-to-role table driving the aggregation pass.
///
/// Defaults match the pRRTC harness CSV layout; substitute field names here
/// to consume other benchmark formats.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Column whose value names the problem group.
    pub group_by: String,
    /// Column holding the binary solved flag.
    pub solved: String,
    /// Label of the gating metric: groups with no samples for it are omitted.
    pub wall_label: String,
    /// Label of the compute-device time metric used for the kernel/wall ratio.
    pub kernel_label: String,
    /// Tracked metrics, in report order.
    pub metrics: Vec<MetricSpec>,
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self {
            group_by: "problem_name".to_string(),
            solved: "solved".to_string(),
            wall_label: "wall_time_ms".to_string(),
            kernel_label: "kernel_time_ms".to_string(),
            metrics: vec![
                MetricSpec::float("wall_ns", "wall_time_ms", "Wall Time", NS_PER_MS, "ms", 2),
                MetricSpec::float(
                    "kernel_ns",
                    "kernel_time_ms",
                    "Kernel Time",
                    NS_PER_MS,
                    "ms",
                    3,
                ),
                MetricSpec::integer("path_length", "path_length", "Path Length"),
                MetricSpec::float("cost", "cost", "Cost", 1.0, "", 2),
                MetricSpec::integer("iters", "iterations", "Iterations"),
            ],
        }
    }
}

/// Descriptive statistics for one metric within one group.
///
/// `samples` counts only the records whose value coerced successfully, so
/// different metrics in the same group may have different sample sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

/// Read-only summary for one problem group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub record_count: usize,
    pub solved_count: usize,
    pub success_rate: f64,
    /// Metric label to summary; a metric with zero coerced values is absent.
    pub metrics: HashMap<String, MetricSummary>,
}

/// A group omitted from the report because its gating metric had no samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedGroup {
    pub name: String,
    pub record_count: usize,
}

/// Summary folded over all retained groups, with equal weight per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStats {
    pub record_count: usize,
    pub solved_count: usize,
    pub success_rate: f64,
    /// Mean of per-group wall-time means, not record-weighted.
    pub avg_wall_time_ms: f64,
    /// Mean of per-group kernel-time means, absent when no group has kernel data.
    pub avg_kernel_time_ms: Option<f64>,
    /// Summed kernel means over summed wall means, as a percentage.
    pub kernel_wall_ratio: Option<f64>,
}

/// Full aggregation result for one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Retained groups, keyed and ordered by problem name.
    pub groups: BTreeMap<String, GroupStats>,
    pub skipped: Vec<SkippedGroup>,
}
