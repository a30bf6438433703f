//! Discovery of the dynamic metric keys present in a bucket collection.
//!
//! The set of levels, exception types or students differs per response, so
//! the series to draw are derived from whatever keys actually occur.

use crate::bucket::Bucket;
use std::collections::BTreeSet;

/// Dynamic sub-field name within a bucket's data mapping.
pub type MetricKey = String;

/// Collect the keys accepted by `predicate` inside the named nested metrics
/// of every bucket.
///
/// A bucket lacking one of `fields`, or holding a plain number under it,
/// contributes nothing for that field.
pub fn discover_keys<P>(buckets: &[Bucket], fields: &[&str], predicate: P) -> BTreeSet<MetricKey>
where
    P: Fn(&str) -> bool,
{
    let mut keys = BTreeSet::new();
    for bucket in buckets {
        for field in fields {
            let Some(nested) = bucket.metric(field).and_then(|m| m.as_nested()) else {
                continue;
            };
            keys.extend(nested.keys().filter(|k| predicate(k.as_str())).cloned());
        }
    }
    log::debug!(
        "discovered {} keys in {:?} across {} buckets",
        keys.len(),
        fields,
        buckets.len()
    );
    keys
}

/// Collect the keys accepted by `predicate` directly in each bucket's data
/// mapping. Used for exception types, which sit at the top level.
pub fn discover_keys_flat<P>(buckets: &[Bucket], predicate: P) -> BTreeSet<MetricKey>
where
    P: Fn(&str) -> bool,
{
    buckets
        .iter()
        .flat_map(|bucket| bucket.data.keys())
        .filter(|k| predicate(k.as_str()))
        .cloned()
        .collect()
}

/// Level identifiers such as `L3`.
pub fn is_level_key(key: &str) -> bool {
    key.chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'l'))
}

/// Exception counters such as `ParseException` or `L1_exception`.
pub fn is_exception_key(key: &str) -> bool {
    key.to_lowercase().ends_with("exception")
}

pub fn any_key(_key: &str) -> bool {
    true
}
