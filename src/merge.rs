use std::collections::HashSet;
use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};

/// Outcome of one reconciliation pass over an owned collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
}

impl MergeStats {
    /// Entries appeared or disappeared. In-place updates are not counted,
    /// the owner decides whether those changed anything.
    pub fn membership_changed(&self) -> bool {
        self.added > 0 || self.removed > 0
    }
}

/// Reconcile `map` against a full snapshot of `records`.
///
/// Records whose key is already present are passed to `update`, unknown keys
/// are built with `create` and appended. Once every record is consumed, entries
/// that the snapshot did not mention are dropped. Surviving entries keep their
/// relative order.
pub fn merge_by_key<K, V, R, I, FK, FC, FU>(
    map: &mut IndexMap<K, V>,
    records: I,
    key: FK,
    mut create: FC,
    mut update: FU,
) -> MergeStats
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = R>,
    FK: Fn(&R) -> K,
    FC: FnMut(R) -> V,
    FU: FnMut(&mut V, R),
{
    let mut stats = MergeStats::default();
    let mut seen = HashSet::new();

    for record in records {
        let k = key(&record);
        match map.get_mut(&k) {
            Some(value) => {
                update(value, record);
                stats.updated += 1;
            }
            None => {
                map.insert(k.clone(), create(record));
                stats.added += 1;
            }
        }
        seen.insert(k);
    }

    let before = map.len();
    map.retain(|k, _| seen.contains(k));
    stats.removed = before - map.len();
    stats
}

/// Same as [`merge_by_key`] for a plain set of identifiers.
pub fn merge_ids<K, I>(set: &mut IndexSet<K>, ids: I) -> MergeStats
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let mut stats = MergeStats::default();
    let mut seen = HashSet::new();

    for id in ids {
        if set.insert(id.clone()) {
            stats.added += 1;
        } else {
            stats.updated += 1;
        }
        seen.insert(id);
    }

    let before = set.len();
    set.retain(|id| seen.contains(id));
    stats.removed = before - set.len();
    stats
}
