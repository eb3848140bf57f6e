//! Conversion functions folding raw samples into typed aggregations.
//!
//! One function per aggregation shape; the catalog binds the right one to
//! each metric. Every call re-types the output slot: the expected variant
//! is reused with its point capacity intact, anything else is replaced
//! fresh. Per-key failures accumulate and are returned joined; only a
//! missing output slot aborts a conversion outright.

use std::time::SystemTime;

use crate::catalog::AttributeTable;
use crate::core::error::{BridgeError, Result};
use crate::core::types::AttributeSet;
use crate::data::{
    Aggregation, Gauge, GaugePoint, Histogram, HistogramPoint, Sum, SumPoint, Temporality,
};
use crate::source::{Sample, Value};

/// Converts unsigned integer counters into a cumulative monotonic
/// [`Sum<i64>`].
///
/// Values convert with `as`; counters are assumed to stay within the
/// signed range in practice.
pub fn sum_i64(
    slot: Option<&mut Aggregation>,
    attrs: &AttributeTable,
    start: SystemTime,
    now: SystemTime,
    samples: &[Sample],
) -> Result<()> {
    let slot = slot.ok_or(BridgeError::MissingSlot)?;
    let mut sum = match std::mem::take(slot) {
        Aggregation::SumI64(mut sum) => {
            sum.points.clear();
            sum
        },
        _ => Sum {
            temporality: Temporality::Cumulative,
            monotonic: true,
            points: Vec::with_capacity(samples.len()),
        },
    };
    sum.temporality = Temporality::Cumulative;
    sum.monotonic = true;

    let mut errors = Vec::new();
    for sample in samples {
        let attributes = lookup(attrs, sample.key, &mut errors);
        let value = match sample.value {
            Value::U64(raw) => raw as i64,
            ref other => {
                errors.push(BridgeError::unexpected_kind(sample.key, "u64", other.kind()));
                continue;
            },
        };
        sum.points.push(SumPoint {
            start_time: start,
            time: now,
            attributes,
            value,
        });
    }

    *slot = Aggregation::SumI64(sum);
    BridgeError::join(errors)
}

/// Converts floating-point counters into a cumulative monotonic
/// [`Sum<f64>`].
pub fn sum_f64(
    slot: Option<&mut Aggregation>,
    attrs: &AttributeTable,
    start: SystemTime,
    now: SystemTime,
    samples: &[Sample],
) -> Result<()> {
    let slot = slot.ok_or(BridgeError::MissingSlot)?;
    let mut sum = match std::mem::take(slot) {
        Aggregation::SumF64(mut sum) => {
            sum.points.clear();
            sum
        },
        _ => Sum {
            temporality: Temporality::Cumulative,
            monotonic: true,
            points: Vec::with_capacity(samples.len()),
        },
    };
    sum.temporality = Temporality::Cumulative;
    sum.monotonic = true;

    let mut errors = Vec::new();
    for sample in samples {
        let attributes = lookup(attrs, sample.key, &mut errors);
        let value = match sample.value {
            Value::F64(raw) => raw,
            ref other => {
                errors.push(BridgeError::unexpected_kind(sample.key, "f64", other.kind()));
                continue;
            },
        };
        sum.points.push(SumPoint {
            start_time: start,
            time: now,
            attributes,
            value,
        });
    }

    *slot = Aggregation::SumF64(sum);
    BridgeError::join(errors)
}

/// Converts unsigned integer counters into a [`Gauge<i64>`] of
/// current-time values.
pub fn gauge_i64(
    slot: Option<&mut Aggregation>,
    attrs: &AttributeTable,
    _start: SystemTime,
    now: SystemTime,
    samples: &[Sample],
) -> Result<()> {
    let slot = slot.ok_or(BridgeError::MissingSlot)?;
    let mut gauge = match std::mem::take(slot) {
        Aggregation::GaugeI64(mut gauge) => {
            gauge.points.clear();
            gauge
        },
        _ => Gauge {
            points: Vec::with_capacity(samples.len()),
        },
    };

    let mut errors = Vec::new();
    for sample in samples {
        let attributes = lookup(attrs, sample.key, &mut errors);
        let value = match sample.value {
            Value::U64(raw) => raw as i64,
            ref other => {
                errors.push(BridgeError::unexpected_kind(sample.key, "u64", other.kind()));
                continue;
            },
        };
        gauge.points.push(GaugePoint {
            time: now,
            attributes,
            value,
        });
    }

    *slot = Aggregation::GaugeI64(gauge);
    BridgeError::join(errors)
}

/// Converts raw float64-bucketed histograms into a cumulative
/// [`Histogram`], translating the bucket scheme on the way.
pub fn histogram(
    slot: Option<&mut Aggregation>,
    attrs: &AttributeTable,
    start: SystemTime,
    now: SystemTime,
    samples: &[Sample],
) -> Result<()> {
    let slot = slot.ok_or(BridgeError::MissingSlot)?;
    let mut hist = match std::mem::take(slot) {
        Aggregation::Histogram(mut hist) => {
            hist.points.clear();
            hist
        },
        _ => Histogram {
            temporality: Temporality::Cumulative,
            points: Vec::with_capacity(samples.len()),
        },
    };
    hist.temporality = Temporality::Cumulative;

    let mut errors = Vec::new();
    for sample in samples {
        let attributes = lookup(attrs, sample.key, &mut errors);
        let raw = match sample.value {
            Value::Histogram(ref raw) => raw,
            ref other => {
                errors.push(BridgeError::unexpected_kind(
                    sample.key,
                    "histogram",
                    other.kind(),
                ));
                continue;
            },
        };
        let (bounds, bucket_counts) = buckets_to_bounds(&raw.buckets, &raw.counts);
        hist.points.push(HistogramPoint {
            start_time: start,
            time: now,
            attributes,
            count: raw.counts.iter().sum(),
            bounds,
            bucket_counts,
        });
    }

    *slot = Aggregation::Histogram(hist);
    BridgeError::join(errors)
}

/// Translates inclusive-lower-bound buckets and their counts into
/// inclusive-upper-bound cut points and bucket counts.
///
/// The source scheme is `[buckets[i], buckets[i+1])` per bucket with the
/// last bucket open-ended; the target scheme is `(bounds[i-1], bounds[i]]`
/// with implicit open buckets on both ends. The inclusivity flips side, so
/// counts sitting exactly on a boundary belong to the wrong neighbor after
/// translation; the original per-sample data needed to redistribute them
/// is gone. This stays a best-effort translation.
///
/// A single-boundary input cannot describe a bucket and yields empty
/// output rather than panicking.
pub fn buckets_to_bounds(buckets: &[f64], counts: &[u64]) -> (Vec<f64>, Vec<u64>) {
    match buckets.len() {
        0 | 1 => (Vec::new(), Vec::new()),
        2 => {
            // One finite cut; the open-ended source bucket has no finite
            // counterpart, so its count is dropped for a zero placeholder.
            (vec![buckets[1]], vec![counts[0], 0])
        },
        len => (buckets[1..len - 1].to_vec(), counts.to_vec()),
    }
}

fn lookup(
    attrs: &AttributeTable,
    key: &'static str,
    errors: &mut Vec<BridgeError>,
) -> AttributeSet {
    match attrs.get(key) {
        Some(set) => set.clone(),
        None => {
            // Cataloging inconsistency; emit the point anyway, unattributed.
            errors.push(BridgeError::missing_attribute(key));
            AttributeSet::default()
        },
    }
}
