//! Raw counter sampling seam.
//!
//! The producer depends on an external counter registry only through
//! [`SampleSource`]: one synchronous, in-process batch read that fills a
//! caller-owned request buffer. Nothing here may block on I/O.

/// A raw histogram as exposed by the counter registry.
///
/// Buckets are inclusive lower bounds of a one-past-the-end-open scheme:
/// bucket `i` covers `[buckets[i], buckets[i+1])` and the last bucket
/// covers `[buckets[n-1], +inf)`. `counts` has one entry per bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawHistogram {
    /// Ascending inclusive lower bounds, length >= 2 for valid data.
    pub buckets: Vec<f64>,
    /// Count per bucket, same length as `buckets`.
    pub counts: Vec<u64>,
}

/// Value slot of a raw sample. The registry defines the runtime kind per
/// key; the caller does not choose it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// No value has been read into this slot yet.
    #[default]
    Unset,
    /// Unsigned 64-bit counter value.
    U64(u64),
    /// Floating-point counter value.
    F64(f64),
    /// Float64-bucketed histogram value.
    Histogram(RawHistogram),
}

impl Value {
    /// Short kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Unset => "unset",
            Value::U64(_) => "u64",
            Value::F64(_) => "f64",
            Value::Histogram(_) => "histogram",
        }
    }
}

/// One raw counter read request and its filled value slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Raw counter key to read.
    pub key: &'static str,
    /// Value slot filled by [`SampleSource::read`].
    pub value: Value,
}

impl Sample {
    /// Creates a request for the given key with an unset value slot.
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            value: Value::Unset,
        }
    }
}

/// Synchronous batch reader over a process's raw counter registry.
///
/// `read` fills every sample's value slot in one pass. Implementations
/// must be in-memory and non-blocking; the producer amortizes collection
/// cost by issuing exactly one `read` per snapshot no matter how many
/// metrics consume the buffer.
pub trait SampleSource {
    /// Fills the value slot of every sample in the buffer.
    fn read(&self, samples: &mut [Sample]);
}
