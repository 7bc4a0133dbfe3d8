use std::collections::{BTreeMap, HashMap};

use tracing::{debug, warn};

use crate::analyzers::types::{
    FieldSchema, GroupStats, MetricSummary, OverallStats, RunSummary, SkippedGroup, ValueKind,
};
use crate::analyzers::utility::{pct, ratio_pct};
use crate::error::{FieldCoercionError, NoDataError};
use crate::loader::RawRecord;

/// Sentinel group for records whose grouping field is missing or empty.
pub const UNKNOWN_GROUP: &str = "unknown";

/// Running min/sum/max over the accepted values of one metric in one group.
#[derive(Debug)]
struct MetricAccumulator {
    samples: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for MetricAccumulator {
    fn default() -> Self {
        Self {
            samples: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl MetricAccumulator {
    fn record(&mut self, value: f64) {
        self.samples += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn summary(&self) -> Option<MetricSummary> {
        if self.samples == 0 {
            return None;
        }
        Some(MetricSummary {
            mean: self.sum / self.samples as f64,
            min: self.min,
            max: self.max,
            samples: self.samples,
        })
    }
}

#[derive(Debug, Default)]
struct GroupAccumulator {
    record_count: usize,
    solved_count: usize,
    metrics: HashMap<String, MetricAccumulator>,
}

impl GroupAccumulator {
    fn finalize(self) -> GroupStats {
        let metrics = self
            .metrics
            .iter()
            .filter_map(|(label, acc)| acc.summary().map(|s| (label.clone(), s)))
            .collect();

        GroupStats {
            record_count: self.record_count,
            solved_count: self.solved_count,
            success_rate: pct(self.solved_count, self.record_count),
            metrics,
        }
    }
}

/// Parses one field of one record as the given numeric kind.
///
/// Integer values are widened to `f64` so every metric series shares one
/// representation downstream.
pub fn coerce_field(
    record: &RawRecord,
    field: &str,
    kind: ValueKind,
) -> Result<f64, FieldCoercionError> {
    let raw = record
        .get(field)
        .ok_or_else(|| FieldCoercionError::Missing(field.to_string()))?;

    match kind {
        ValueKind::Float => raw.parse::<f64>().map_err(|_| FieldCoercionError::Invalid {
            field: field.to_string(),
            value: raw.clone(),
            expected: "float",
        }),
        ValueKind::Integer => raw
            .parse::<i64>()
            .map(|v| v as f64)
            .map_err(|_| FieldCoercionError::Invalid {
                field: field.to_string(),
                value: raw.clone(),
                expected: "integer",
            }),
    }
}

/// Groups records by problem name and computes per-group statistics.
///
/// Grouping never drops a record: rows without a usable grouping field land
/// in the [`UNKNOWN_GROUP`] sentinel. Each metric field is coerced
/// independently per record; a value that fails to parse is dropped from
/// that one metric's series and nothing else. A group whose gating metric
/// collected no samples at all is moved to `skipped` instead of the
/// retained map.
pub fn aggregate(records: &[RawRecord], schema: &FieldSchema) -> RunSummary {
    let mut accumulators: BTreeMap<String, GroupAccumulator> = BTreeMap::new();

    for record in records {
        let key = match record.get(&schema.group_by) {
            Some(name) if !name.is_empty() => name.as_str(),
            _ => UNKNOWN_GROUP,
        };
        let group = accumulators.entry(key.to_string()).or_default();
        group.record_count += 1;

        match coerce_field(record, &schema.solved, ValueKind::Integer) {
            Ok(flag) if flag != 0.0 => group.solved_count += 1,
            Ok(_) => {}
            Err(e) => {
                debug!(group = key, error = %e, "solved flag unreadable, counting as unsolved");
            }
        }

        for spec in &schema.metrics {
            match coerce_field(record, &spec.field, spec.kind) {
                Ok(value) => group
                    .metrics
                    .entry(spec.label.clone())
                    .or_default()
                    .record(value / spec.divisor),
                Err(e) => {
                    debug!(group = key, metric = %spec.label, error = %e, "value excluded from series");
                }
            }
        }
    }

    let mut groups = BTreeMap::new();
    let mut skipped = Vec::new();

    for (name, acc) in accumulators {
        let record_count = acc.record_count;
        let stats = acc.finalize();
        if stats.metrics.contains_key(&schema.wall_label) {
            groups.insert(name, stats);
        } else {
            let reason = NoDataError::new(&name, &schema.wall_label);
            warn!(group = %name, record_count, "{reason}, group omitted from report");
            skipped.push(SkippedGroup { name, record_count });
        }
    }

    RunSummary { groups, skipped }
}

impl RunSummary {
    /// Folds the retained groups into one overall summary.
    ///
    /// Timing averages weight each group equally (mean of per-group means),
    /// so problems with more trials do not dominate. The kernel/wall ratio
    /// compares the summed per-group means of the two timings.
    pub fn overall(&self, schema: &FieldSchema) -> Result<OverallStats, NoDataError> {
        if self.groups.is_empty() {
            return Err(NoDataError::new("overall", &schema.wall_label));
        }

        let mut record_count = 0;
        let mut solved_count = 0;
        let mut wall_means = Vec::new();
        let mut kernel_means = Vec::new();

        for stats in self.groups.values() {
            record_count += stats.record_count;
            solved_count += stats.solved_count;
            if let Some(m) = stats.metrics.get(&schema.wall_label) {
                wall_means.push(m.mean);
            }
            if let Some(m) = stats.metrics.get(&schema.kernel_label) {
                kernel_means.push(m.mean);
            }
        }

        let wall_sum: f64 = wall_means.iter().sum();
        let kernel_sum: f64 = kernel_means.iter().sum();

        let avg_kernel_time_ms = if kernel_means.is_empty() {
            None
        } else {
            Some(kernel_sum / kernel_means.len() as f64)
        };
        let kernel_wall_ratio = if kernel_means.is_empty() {
            None
        } else {
            ratio_pct(kernel_sum, wall_sum)
        };

        Ok(OverallStats {
            record_count,
            solved_count,
            success_rate: pct(solved_count, record_count),
            avg_wall_time_ms: wall_sum / wall_means.len() as f64,
            avg_kernel_time_ms,
            kernel_wall_ratio,
        })
    }
}
