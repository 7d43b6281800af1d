//! Fatal signals and keyed-store helpers used by generated bodies.

/// Raised when a requirement that must produce a value has no handler.
#[cold]
#[track_caller]
pub fn unconfigured_handler(owner: &str, field: &str) -> ! {
    panic!("{owner}.{field} is not configured: install a handler before invoking this requirement")
}

/// Raised when a stubbed value is read before it was assigned.
#[cold]
#[track_caller]
pub fn unset_value(owner: &str, field: &str) -> ! {
    panic!("{owner}.{field} was read before a value was stubbed")
}

/// Inserts or replaces the entry stored under `key`.
pub fn upsert<K: PartialEq, V>(entries: &mut Vec<(K, V)>, key: K, value: V) {
    match entries.iter_mut().find(|(candidate, _)| *candidate == key) {
        Some((_, slot)) => *slot = value,
        None => entries.push((key, value)),
    }
}

pub fn lookup<K: PartialEq, V: Clone>(entries: &[(K, V)], key: &K) -> Option<V> {
    entries
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, value)| value.clone())
}
