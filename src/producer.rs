//! Snapshot producer: one batched counter read fanned through per-metric
//! conversion processors.
//!
//! Construction applies the filter chain to a private copy of the
//! catalog's key lists, sizes the flat sample buffer once, and binds one
//! processor per surviving metric. Each `produce` call performs exactly
//! one batch read and rewrites the reusable snapshot in place, so the
//! counter-collection cost dominates and is paid once regardless of
//! catalog size.

use std::ops::Range;
use std::time::SystemTime;

use tracing::{debug, warn};

use crate::catalog::{self, AttributeTable, ConvertFn, Metric};
use crate::core::error::{BridgeError, Result};
use crate::core::types::Scope;
use crate::data::{Aggregation, MetricData, ScopeMetrics};
use crate::filter::{self, Filter};
use crate::source::{Sample, SampleSource};

/// Instrumentation scope identity attached to every snapshot.
pub const SCOPE: Scope = Scope {
    name: "runtime-bridge",
    version: env!("CARGO_PKG_VERSION"),
};

/// Injectable wall clock. Supplied at construction for deterministic
/// timestamps in tests; defaults to [`SystemTime::now`].
pub type Clock = Box<dyn Fn() -> SystemTime + Send + Sync>;

/// Binding of one catalog entry to its snapshot slot and its slice of
/// the shared sample buffer.
struct Processor {
    /// Index of the metric's slot in the snapshot.
    metric: usize,
    /// This metric's contiguous range of the sample buffer.
    samples: Range<usize>,
    attrs: AttributeTable,
    convert: ConvertFn,
}

/// Produces metric snapshots from a raw counter source.
///
/// The sample buffer and the snapshot are owned by the producer and
/// rewritten on every [`produce`](Producer::produce) call; callers must
/// not retain snapshot references across calls if they do not want the
/// data overwritten. `produce` takes `&mut self`, so concurrent callers
/// have to serialize access externally.
pub struct Producer {
    source: Box<dyn SampleSource + Send>,
    clock: Clock,
    /// Accumulation start for cumulative aggregations, fixed for the
    /// life of the producer.
    start: SystemTime,
    samples: Vec<Sample>,
    processors: Vec<Processor>,
    snapshot: ScopeMetrics,
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("start", &self.start)
            .field("processors", &self.processors.len())
            .finish_non_exhaustive()
    }
}

impl Producer {
    /// Starts building a producer over the given counter source.
    pub fn builder<S>(source: S) -> ProducerBuilder
    where
        S: SampleSource + Send + 'static,
    {
        ProducerBuilder {
            catalog: catalog::all(),
            filters: Vec::new(),
            deduplicate: true,
            clock: None,
            source: Box::new(source),
        }
    }

    /// Produces one snapshot: a single batched counter read, then every
    /// processor's conversion in stable catalog order.
    ///
    /// Per-metric errors are joined and returned alongside the snapshot
    /// without short-circuiting; data produced for healthy metrics stays
    /// valid. There is no cancellation surface: reads are synchronous
    /// in-process memory reads, and a caller needing timeouts must wrap
    /// the call at a higher layer.
    pub fn produce(&mut self) -> (&ScopeMetrics, Result<()>) {
        let now = (self.clock)();
        self.source.read(&mut self.samples);

        let mut errors = Vec::new();
        for processor in &self.processors {
            let slot = &mut self.snapshot.metrics[processor.metric].aggregation;
            let samples = &self.samples[processor.samples.clone()];
            if let Err(err) =
                (processor.convert)(Some(slot), &processor.attrs, self.start, now, samples)
            {
                errors.push(err);
            }
        }

        let result = BridgeError::join(errors);
        if let Err(ref err) = result {
            warn!(error = %err, "metric conversion reported errors");
        }
        (&self.snapshot, result)
    }

    /// The accumulation start time shared by all cumulative points.
    pub fn start_time(&self) -> SystemTime {
        self.start
    }
}

/// Builder for [`Producer`], collecting filters and construction options.
pub struct ProducerBuilder {
    catalog: &'static [Metric],
    filters: Vec<Filter>,
    deduplicate: bool,
    clock: Option<Clock>,
    source: Box<dyn SampleSource + Send>,
}

impl ProducerBuilder {
    /// Appends a filter that only allows metrics for the given raw
    /// counter keys. Filters apply in the order they are added.
    ///
    /// With no names, nothing is allowed.
    pub fn include_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::include_only(names));
        self
    }

    /// Appends a filter that suppresses metrics for the given raw
    /// counter keys. Filters apply in the order they are added.
    ///
    /// With no names, everything stays allowed.
    pub fn exclude_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::exclude_only(names));
        self
    }

    /// Controls whether a key accepted by several overlapping filters is
    /// kept once (the default) or once per accepting filter.
    ///
    /// Retaining duplicates makes such a key's samples count more than
    /// once in the produced points.
    pub fn deduplicate_keys(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Overrides the wall clock used for the accumulation start time and
    /// per-call collection timestamps.
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> SystemTime + Send + Sync + 'static,
    {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Replaces the built-in metric catalog. The table is consumed
    /// read-only.
    pub fn with_catalog(mut self, catalog: &'static [Metric]) -> Self {
        self.catalog = catalog;
        self
    }

    /// Builds the producer: filters the key lists, validates attribute
    /// tables, and allocates the sample buffer and snapshot for reuse.
    pub fn build(self) -> Result<Producer> {
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemTime::now));
        let start = clock();

        // Private copies of the key lists; the shared catalog is never
        // mutated by filtering.
        let filtered: Vec<Vec<&'static str>> = self
            .catalog
            .iter()
            .map(|metric| filter::apply(&self.filters, metric.raw_keys, self.deduplicate))
            .collect();
        let sample_total: usize = filtered.iter().map(Vec::len).sum();

        let mut producer = Producer {
            source: self.source,
            clock,
            start,
            samples: Vec::with_capacity(sample_total),
            processors: Vec::with_capacity(self.catalog.len()),
            snapshot: ScopeMetrics {
                scope: SCOPE,
                metrics: vec![MetricData::default(); self.catalog.len()],
            },
        };

        for (index, (metric, keys)) in self.catalog.iter().zip(&filtered).enumerate() {
            if keys.is_empty() {
                // Every raw key filtered out; the snapshot keeps the
                // placeholder entry and no processor is built.
                continue;
            }

            producer.snapshot.metrics[index] = MetricData {
                name: metric.identity.name,
                description: metric.identity.description,
                unit: metric.identity.unit,
                aggregation: Aggregation::Empty,
            };

            let begin = producer.samples.len();
            for &key in keys {
                producer.samples.push(Sample::new(key));
            }

            producer.processors.push(Processor {
                metric: index,
                samples: begin..producer.samples.len(),
                attrs: AttributeTable::new(metric.identity.name, metric.attributes)?,
                convert: metric.convert,
            });
        }

        debug!(
            metrics = producer.snapshot.metrics.len(),
            processors = producer.processors.len(),
            samples = producer.samples.len(),
            "runtime metric producer ready"
        );
        Ok(producer)
    }
}
