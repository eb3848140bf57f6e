//! Name-based inclusion/exclusion filtering over raw counter keys.
//!
//! Filters are pure total predicates composed into an ordered chain at
//! producer construction. The chain keeps a key once per filter that
//! accepts it: a union of matches across filters, not a conjunction
//! pipeline. Overlapping predicates can therefore retain a key more than
//! once; whether those duplicates survive is the producer's
//! deduplication choice, not the chain's.

use std::collections::HashSet;

/// A predicate over raw counter keys.
pub struct Filter {
    predicate: Box<dyn Fn(&str) -> bool + Send + Sync>,
}

impl Filter {
    /// Accepts only keys in the given allow-set.
    ///
    /// With no names, the filter accepts nothing.
    pub fn include_only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allow: HashSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            predicate: Box::new(move |name| allow.contains(name)),
        }
    }

    /// Rejects keys in the given deny-set.
    ///
    /// With no names, the filter accepts everything.
    pub fn exclude_only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deny: HashSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            predicate: Box::new(move |name| !deny.contains(name)),
        }
    }

    /// Tests a raw counter key against this filter.
    pub fn accepts(&self, name: &str) -> bool {
        (self.predicate)(name)
    }
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Filter")
    }
}

/// Applies a filter chain to one metric's raw-key list.
///
/// Every filter tests every key of the original list. An empty chain
/// leaves the list untouched. With `deduplicate` set, a key is kept only
/// on its first acceptance; otherwise each accepting filter retains its
/// own copy.
pub(crate) fn apply(
    filters: &[Filter],
    keys: &[&'static str],
    deduplicate: bool,
) -> Vec<&'static str> {
    if filters.is_empty() {
        return keys.to_vec();
    }

    let mut kept = Vec::with_capacity(keys.len());
    for filter in filters {
        for &key in keys {
            if filter.accepts(key) && !(deduplicate && kept.contains(&key)) {
                kept.push(key);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const KEYS: &[&str] = &["/a:calls", "/b:calls", "/c:calls"];

    #[test]
    fn test_empty_chain_keeps_everything() {
        assert_eq!(apply(&[], KEYS, true), KEYS.to_vec());
    }

    #[test]
    fn test_include_only_exact_list() {
        let chain = [Filter::include_only(["/b:calls"])];
        assert_eq!(apply(&chain, KEYS, true), vec!["/b:calls"]);
    }

    #[test]
    fn test_include_only_empty_accepts_nothing() {
        let chain = [Filter::include_only(Vec::<String>::new())];
        assert_eq!(apply(&chain, KEYS, true), Vec::<&str>::new());
    }

    #[test]
    fn test_exclude_only_exact_list() {
        let chain = [Filter::exclude_only(["/b:calls"])];
        assert_eq!(apply(&chain, KEYS, true), vec!["/a:calls", "/c:calls"]);
    }

    #[test]
    fn test_exclude_only_empty_accepts_everything() {
        let chain = [Filter::exclude_only(Vec::<String>::new())];
        assert_eq!(apply(&chain, KEYS, true), KEYS.to_vec());
    }

    #[test]
    fn test_overlapping_filters_duplicate_without_dedup() {
        // Include accepts /a; exclude accepts /a and /c. The union keeps
        // /a twice when duplicates are retained.
        let chain = [
            Filter::include_only(["/a:calls"]),
            Filter::exclude_only(["/b:calls"]),
        ];
        assert_eq!(
            apply(&chain, KEYS, false),
            vec!["/a:calls", "/a:calls", "/c:calls"]
        );
    }

    #[test]
    fn test_overlapping_filters_dedup_keeps_first_acceptance() {
        let chain = [
            Filter::include_only(["/a:calls"]),
            Filter::exclude_only(["/b:calls"]),
        ];
        assert_eq!(apply(&chain, KEYS, true), vec!["/a:calls", "/c:calls"]);
    }

    #[test]
    fn test_chain_order_is_filter_major() {
        // The second filter's matches follow the first filter's, in
        // original key order within each.
        let chain = [
            Filter::include_only(["/c:calls"]),
            Filter::include_only(["/a:calls"]),
        ];
        assert_eq!(apply(&chain, KEYS, false), vec!["/c:calls", "/a:calls"]);
    }
}
