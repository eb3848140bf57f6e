//! Static metric definition catalog.
//!
//! Each entry names the raw counter keys it aggregates, a human-readable
//! identity, a raw-key-to-attribute mapping, and the conversion function
//! that folds read samples into the metric's aggregation. The table is
//! configuration data consumed read-only; the producer copies what it
//! needs and never mutates the shared catalog.

mod table;

pub use table::all;

use std::time::SystemTime;

use crate::core::error::{BridgeError, Result};
use crate::core::types::{AttributeSet, KeyValue};
use crate::data::Aggregation;
use crate::source::Sample;

/// Human-readable identity of one logical metric.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    /// Metric name.
    pub name: &'static str,
    /// Description of what the metric measures.
    pub description: &'static str,
    /// Unit of the data points.
    pub unit: &'static str,
}

/// Static raw-key-to-attribute-pairs mapping entry of one metric.
pub type AttributeSpec = (&'static str, &'static [KeyValue]);

/// Conversion function folding a batch of raw samples into the metric's
/// aggregation slot.
///
/// `slot` is `None` only on a caller contract violation; conversion fails
/// fast in that case. All other failures (missing attribute mapping,
/// unexpected value kind) are accumulated per key and returned joined,
/// never aborting the remaining samples.
pub type ConvertFn = fn(
    slot: Option<&mut Aggregation>,
    attrs: &AttributeTable,
    start: SystemTime,
    now: SystemTime,
    samples: &[Sample],
) -> Result<()>;

/// One catalog entry: a logical metric composed from one or more raw
/// counters.
#[derive(Debug, Clone, Copy)]
pub struct Metric {
    /// Raw counter keys, in the order their data points are emitted.
    pub raw_keys: &'static [&'static str],
    /// Metric identity.
    pub identity: Identity,
    /// Raw-key-to-attribute mapping for sub-series of this metric.
    pub attributes: &'static [AttributeSpec],
    /// Conversion function owned by this metric.
    pub convert: ConvertFn,
}

/// Precomputed raw-key to [`AttributeSet`] lookup for one metric.
///
/// Built at producer construction; building fails if two raw keys of the
/// same metric collapse to the same attribute set, since the resulting
/// data points would be indistinguishable sub-series.
#[derive(Debug)]
pub struct AttributeTable {
    entries: Vec<(&'static str, AttributeSet)>,
}

impl AttributeTable {
    /// Builds the lookup from a metric's static attribute specs.
    pub fn new(metric_name: &str, specs: &[AttributeSpec]) -> Result<Self> {
        let mut entries: Vec<(&'static str, AttributeSet)> = Vec::with_capacity(specs.len());
        for (key, pairs) in specs {
            let set = AttributeSet::new(pairs);
            if let Some((other, _)) = entries.iter().find(|(_, existing)| *existing == set) {
                return Err(BridgeError::construction(format!(
                    "metric {metric_name}: raw keys {other} and {key} share one attribute set"
                )));
            }
            entries.push((key, set));
        }
        Ok(Self { entries })
    }

    /// Looks up the attribute set for a raw key.
    pub fn get(&self, key: &str) -> Option<&AttributeSet> {
        // Tables hold a handful of keys; a scan beats hashing here.
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, set)| set)
    }
}

/// All raw counter keys referenced by the built-in catalog, in catalog
/// order. Useful for building filters against the actual key set.
pub fn raw_keys() -> impl Iterator<Item = &'static str> {
    all().iter().flat_map(|metric| metric.raw_keys.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_tables_validate() {
        for metric in all() {
            AttributeTable::new(metric.identity.name, metric.attributes)
                .expect("built-in attribute tables are distinct");
        }
    }

    #[test]
    fn test_builtin_keys_match_attribute_specs() {
        for metric in all() {
            let table = AttributeTable::new(metric.identity.name, metric.attributes).unwrap();
            for key in metric.raw_keys {
                assert!(
                    table.get(key).is_some(),
                    "{} lacks attributes for {key}",
                    metric.identity.name
                );
            }
        }
    }

    #[test]
    fn test_raw_key_enumeration() {
        let keys: Vec<_> = raw_keys().collect();
        assert_eq!(keys.len(), 18);
        assert!(keys.contains(&"/ffi/host-calls:calls"));
        assert!(keys.contains(&"/cpu/classes/total:cpu-seconds"));
    }

    #[test]
    fn test_duplicate_attribute_sets_rejected() {
        const CLASS_USER: &[KeyValue] = &[KeyValue::new("class", "user")];
        let specs: &[AttributeSpec] = &[
            ("/a:calls", CLASS_USER),
            ("/b:calls", CLASS_USER),
        ];
        let err = AttributeTable::new("broken.metric", specs).unwrap_err();
        assert_eq!(err.category(), "construction");
        assert!(err.to_string().contains("broken.metric"));
    }
}
