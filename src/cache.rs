//! Cache Reconciler
//!
//! Keeps the persisted mirror in step with remote results. Records are
//! keyed by server id; a freshly fetched record always replaces the mirrored
//! copy, records the remote did not return are kept in place.

use std::collections::HashMap;

use crate::models::{Pagination, Record, Task, TaskFilter};

/// Merge `fresh` into `mirror`, keeping the mirror's order and appending
/// records it has never seen. Records without an id are dropped.
pub fn reconcile<T: Record>(mirror: Vec<T>, fresh: &[T]) -> Vec<T> {
    let mut merged: Vec<T> = Vec::with_capacity(mirror.len() + fresh.len());
    let mut index: HashMap<u64, usize> = HashMap::new();

    for record in mirror.into_iter().chain(fresh.iter().cloned()) {
        let Some(id) = record.id() else { continue };
        match index.get(&id) {
            Some(&pos) => merged[pos] = record,
            None => {
                index.insert(id, merged.len());
                merged.push(record);
            }
        }
    }
    merged
}

/// Put `record` at the front, replacing any copy with the same id
pub fn prepend<T: Record>(records: &mut Vec<T>, record: T) {
    if let Some(id) = record.id() {
        records.retain(|r| r.id() != Some(id));
    }
    records.insert(0, record);
}

/// Replace the record with the same id; returns whether one was found
pub fn replace<T: Record>(records: &mut [T], record: T) -> bool {
    let Some(id) = record.id() else { return false };
    match records.iter_mut().find(|r| r.id() == Some(id)) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Replace in place, or put at the front when absent
pub fn upsert<T: Record>(records: &mut Vec<T>, record: T) {
    if !replace(records, record.clone()) {
        records.insert(0, record);
    }
}

/// Drop every record with `id`; returns whether any was removed
pub fn remove<T: Record>(records: &mut Vec<T>, id: u64) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != Some(id));
    records.len() != before
}

/// Identifier for a record created while offline: the current epoch
/// milliseconds, bumped past any id already in use
pub fn local_id<T: Record>(records: &[T], now_millis: u64) -> u64 {
    let mut id = now_millis;
    while records.iter().any(|r| r.id() == Some(id)) {
        id += 1;
    }
    id
}

/// Answer a list query from the mirror: returns the requested page and the
/// number of records matching the filter
pub fn query_tasks(mirror: &[Task], filter: &TaskFilter, pagination: &Pagination) -> (Vec<Task>, u64) {
    let matching: Vec<&Task> = mirror.iter().filter(|t| filter.matches(t)).collect();
    let total = matching.len() as u64;
    let limit = pagination.limit.max(1) as usize;
    let start = (pagination.page.max(1) as usize - 1).saturating_mul(limit);
    let page = matching
        .into_iter()
        .skip(start)
        .take(limit)
        .cloned()
        .collect();
    (page, total)
}
