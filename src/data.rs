//! Metric data model for produced snapshots.
//!
//! Aggregations mirror the OTEL metric data shapes: cumulative sums,
//! gauges, and explicit-boundary histograms. A snapshot slot holds a
//! tagged [`Aggregation`] that conversion functions re-type in place on
//! every produce pass, so the variant can be matched without dynamic
//! type assertions.

use serde::Serialize;
use std::time::SystemTime;

use crate::core::types::{AttributeSet, Scope};

/// Whether point values accumulate from a fixed start time or reset
/// between reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Temporality {
    /// Running totals since a fixed start time.
    Cumulative,
    /// Changes since the previous read.
    Delta,
}

/// A single data point of a cumulative sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SumPoint<T> {
    /// Start of accumulation, fixed at producer construction.
    pub start_time: SystemTime,
    /// Collection time of this point.
    pub time: SystemTime,
    /// Sub-series attributes.
    pub attributes: AttributeSet,
    /// Accumulated value.
    pub value: T,
}

/// A single data point of a gauge. Gauges carry no start time, only the
/// current-time value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugePoint<T> {
    /// Collection time of this point.
    pub time: SystemTime,
    /// Sub-series attributes.
    pub attributes: AttributeSet,
    /// Last observed value.
    pub value: T,
}

/// A single data point of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPoint {
    /// Start of accumulation, fixed at producer construction.
    pub start_time: SystemTime,
    /// Collection time of this point.
    pub time: SystemTime,
    /// Sub-series attributes.
    pub attributes: AttributeSet,
    /// Total number of recorded observations across all buckets.
    pub count: u64,
    /// Ascending finite upper-bound cut points.
    pub bounds: Vec<f64>,
    /// Per-bucket counts, carried through from the source histogram.
    pub bucket_counts: Vec<u64>,
}

/// A cumulative sum aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sum<T> {
    /// Always [`Temporality::Cumulative`] for produced snapshots.
    pub temporality: Temporality,
    /// True where the source counter is strictly increasing.
    pub monotonic: bool,
    /// One point per surviving raw key, in catalog key order.
    pub points: Vec<SumPoint<T>>,
}

/// A gauge aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Gauge<T> {
    /// One point per surviving raw key, in catalog key order.
    pub points: Vec<GaugePoint<T>>,
}

/// A histogram aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Always [`Temporality::Cumulative`] for produced snapshots.
    pub temporality: Temporality,
    /// One point per surviving raw key, in catalog key order.
    pub points: Vec<HistogramPoint>,
}

/// Aggregated data for one logical metric.
///
/// `Empty` marks an unset slot: either the metric has not been produced
/// yet, or every one of its raw keys was filtered out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum Aggregation {
    /// No data points; placeholder for filtered-out or unproduced metrics.
    #[default]
    Empty,
    /// Cumulative integer sum.
    SumI64(Sum<i64>),
    /// Cumulative floating-point sum.
    SumF64(Sum<f64>),
    /// Integer gauge.
    GaugeI64(Gauge<i64>),
    /// Explicit-boundary histogram.
    Histogram(Histogram),
}

impl Aggregation {
    /// Number of data points currently held, zero for `Empty`.
    pub fn point_count(&self) -> usize {
        match self {
            Aggregation::Empty => 0,
            Aggregation::SumI64(sum) => sum.points.len(),
            Aggregation::SumF64(sum) => sum.points.len(),
            Aggregation::GaugeI64(gauge) => gauge.points.len(),
            Aggregation::Histogram(hist) => hist.points.len(),
        }
    }

    /// Returns true if the slot holds no aggregation.
    pub fn is_empty(&self) -> bool {
        matches!(self, Aggregation::Empty)
    }
}

/// One metric entry of a snapshot: identity plus aggregated data.
///
/// Entries whose raw keys were all filtered out stay at the default value
/// (blank identity, [`Aggregation::Empty`]) so the snapshot shape is
/// stable across filter configurations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricData {
    /// Metric name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Unit of the data points.
    pub unit: &'static str,
    /// Aggregated data, rewritten in place on every produce pass.
    pub aggregation: Aggregation,
}

/// The full set of aggregations produced in one pass, grouped under one
/// instrumentation scope identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeMetrics {
    /// Scope the metrics belong to.
    pub scope: Scope,
    /// One entry per catalog definition, in catalog order.
    pub metrics: Vec<MetricData>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count_per_variant() {
        assert_eq!(Aggregation::Empty.point_count(), 0);

        let gauge = Aggregation::GaugeI64(Gauge {
            points: vec![GaugePoint {
                time: SystemTime::UNIX_EPOCH,
                attributes: AttributeSet::default(),
                value: 7,
            }],
        });
        assert_eq!(gauge.point_count(), 1);
        assert!(!gauge.is_empty());
    }

    #[test]
    fn test_default_metric_data_is_placeholder() {
        let entry = MetricData::default();
        assert_eq!(entry.name, "");
        assert!(entry.aggregation.is_empty());
    }
}
