use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// A single attribute key/value pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    /// Attribute key, unique within one [`AttributeSet`].
    pub key: &'static str,
    /// Attribute value.
    pub value: &'static str,
}

impl KeyValue {
    /// Creates a new key/value pair
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// An unordered set of attribute pairs distinguishing sub-series within
/// one logical metric.
///
/// Pairs are kept sorted by key so equality is logical equality of the
/// contents, independent of the order they were supplied in. Keys are
/// unique within a set; a later duplicate key is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSet(SmallVec<[KeyValue; 2]>);

impl AttributeSet {
    /// Builds a set from the given pairs, sorting and deduplicating by key.
    pub fn new(pairs: &[KeyValue]) -> Self {
        let mut inner: SmallVec<[KeyValue; 2]> = SmallVec::from_slice(pairs);
        // Stable sort so the first occurrence of a duplicated key wins.
        inner.sort_by_key(|kv| kv.key);
        inner.dedup_by_key(|kv| kv.key);
        Self(inner)
    }

    /// Number of pairs in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set carries no pairs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up the value for an attribute key.
    pub fn get(&self, key: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|kv| kv.key == key)
            .map(|kv| kv.value)
    }

    /// Iterates the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }
}

/// Instrumentation scope identity a snapshot is grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scope {
    /// Scope name.
    pub name: &'static str,
    /// Scope version.
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_set_order_independent_equality() {
        let a = AttributeSet::new(&[
            KeyValue::new("class", "user"),
            KeyValue::new("mode", "strict"),
        ]);
        let b = AttributeSet::new(&[
            KeyValue::new("mode", "strict"),
            KeyValue::new("class", "user"),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_attribute_set_keys_unique() {
        let set = AttributeSet::new(&[
            KeyValue::new("class", "user"),
            KeyValue::new("class", "idle"),
        ]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("class"), Some("user"));
    }

    #[test]
    fn test_empty_sets_are_equal() {
        assert_eq!(AttributeSet::default(), AttributeSet::new(&[]));
        assert!(AttributeSet::default().is_empty());
    }
}
