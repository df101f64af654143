//! Snapshot comparison engine.
//!
//! Compares two snapshots of the item catalog and reports changes:
//! - Matches items by id (stable across the day)
//! - Classifies into added, removed, and quantity-changed
//! - Items present in both with equal quantity are omitted entirely,
//!   even when status or name differ

use std::collections::HashMap;

use serde::Serialize;

use super::snapshot::{Snapshot, SnapshotItem};

/// A quantity change for an item present in both snapshots. The item is
/// carried as it appears in the later snapshot; `change` is the signed
/// delta (later minus earlier).
#[derive(Debug, Clone, Serialize)]
pub struct QuantityChange {
    pub item: SnapshotItem,
    pub change: i64,
}

/// Three disjoint sets keyed by item id. Recomputed on demand; never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DailyDiff {
    pub added: Vec<SnapshotItem>,
    pub removed: Vec<SnapshotItem>,
    pub changed: Vec<QuantityChange>,
}

impl DailyDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }

    /// Total units removed across the `removed` set, as they stood in the
    /// earlier snapshot. Used by the fallback summary.
    pub fn removed_quantity(&self) -> u64 {
        self.removed.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// Compare two snapshots, earlier against later.
///
/// Both lookup maps are last-write-wins per id: if a snapshot's item list
/// somehow carries the same id twice, the later entry shadows the earlier
/// one. Callers that need stricter behavior must reject duplicates before
/// capture.
///
/// Output ordering follows the later snapshot's item order for `added` and
/// `changed`, and the earlier snapshot's order for `removed`, so reports
/// are stable for a given pair of inputs.
pub fn compare(earlier: &Snapshot, later: &Snapshot) -> DailyDiff {
    let earlier_map: HashMap<&str, &SnapshotItem> = earlier
        .items
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();
    let later_map: HashMap<&str, &SnapshotItem> = later
        .items
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();

    // walk the later snapshot's list (not the map) for stable ordering;
    // the map lookup keeps last-write-wins semantics for duplicates
    for item in &later.items {
        let Some(current) = later_map.get(item.id.as_str()) else {
            continue;
        };
        // skip shadowed duplicates
        if !std::ptr::eq(*current, item) {
            continue;
        }

        match earlier_map.get(item.id.as_str()) {
            None => added.push(item.clone()),
            Some(before) if before.quantity != item.quantity => {
                changed.push(QuantityChange {
                    item: item.clone(),
                    change: i64::from(item.quantity) - i64::from(before.quantity),
                });
            }
            Some(_) => {}
        }
    }

    let mut removed = Vec::new();
    for item in &earlier.items {
        let Some(current) = earlier_map.get(item.id.as_str()) else {
            continue;
        };
        if !std::ptr::eq(*current, item) {
            continue;
        }

        if !later_map.contains_key(item.id.as_str()) {
            removed.push(item.clone());
        }
    }

    DailyDiff {
        added,
        removed,
        changed,
    }
}
