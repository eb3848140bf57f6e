//! Runtime-bridge - runtime counter to metric snapshot producer.
//!
//! Runtime-bridge samples a fixed catalog of low-level process runtime
//! counters and folds every read into typed, attributed metric data
//! points (sums, gauges, histograms) grouped under one instrumentation
//! scope, ready for an external metrics collector to pick up.
//!
//! # Features
//!
//! - **One batched read per snapshot**: counter collection cost is paid
//!   once per `produce` call, regardless of catalog size
//! - **Zero per-call allocation**: the sample buffer and snapshot point
//!   containers are allocated at construction and reused
//! - **Name-based filtering**: composable include/exclude filters over
//!   raw counter keys
//! - **Best-effort failures**: one broken metric never invalidates the
//!   data produced for the others
//!
//! # Architecture
//!
//! - `catalog`: the static metric definition table
//! - `source`: the raw counter batch-read seam
//! - `convert`: per-metric conversion functions and bucket translation
//! - `filter`: raw-key inclusion/exclusion predicates
//! - `producer`: the snapshot producer tying it all together
//!
//! # Example
//!
//! ```no_run
//! use runtime_bridge::producer::Producer;
//! use runtime_bridge::source::{RawHistogram, Sample, SampleSource, Value};
//!
//! struct RegistrySource;
//!
//! impl SampleSource for RegistrySource {
//!     fn read(&self, samples: &mut [Sample]) {
//!         // Fill each slot from the process's counter registry with the
//!         // value kind the registry defines for the key.
//!         for sample in samples {
//!             sample.value = match sample.key {
//!                 key if key.ends_with(":cpu-seconds") => Value::F64(0.0),
//!                 key if key.ends_with(":bytes") && key.contains("by-size") => {
//!                     Value::Histogram(RawHistogram::default())
//!                 },
//!                 _ => Value::U64(0),
//!             };
//!         }
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut producer = Producer::builder(RegistrySource).build()?;
//!     let (snapshot, result) = producer.produce();
//!     result?;
//!     println!("{} metrics", snapshot.metrics.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod catalog;
pub mod convert;
pub mod core;
pub mod data;
pub mod filter;
pub mod producer;
pub mod source;

// Re-export core types for convenience
pub use crate::core::{BridgeError, Result};
pub use crate::producer::{Producer, ProducerBuilder};
