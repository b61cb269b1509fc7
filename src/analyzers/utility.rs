use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::analyzers::types::Entry;
use crate::records::{RecordSet, TripRecord};

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Share of `part` in `total` as a percentage. Returns 0.0 when `total` is zero.
pub fn pct(part: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        (part / total) * 100.0
    }
}

/// Sums `value` per `key`, keeping groups in first-seen order.
pub fn group_sum<K, FK, FV>(set: &RecordSet, key: FK, value: FV) -> Vec<Entry<K>>
where
    K: Eq + Hash + Clone,
    FK: Fn(&TripRecord) -> K,
    FV: Fn(&TripRecord) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<Entry<K>> = Vec::new();

    for record in set {
        let k = key(record);
        let v = value(record);
        match index.get(&k) {
            Some(&i) => entries[i].value += v,
            None => {
                index.insert(k.clone(), entries.len());
                entries.push(Entry { key: k, value: v });
            }
        }
    }

    entries
}

/// Stable descending sort by value; equal values keep their order.
pub fn sort_desc<K>(entries: &mut [Entry<K>]) {
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
}

/// Orders present values ascending with `None` last.
pub fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Orders categorical labels: numeric labels numerically and before text,
/// text lexicographically.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
