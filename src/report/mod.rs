//! Daily report assembly.
//!
//! A report pairs the morning and evening snapshots of one day with the
//! diff between them. Building one checks the missing-snapshot
//! precondition; the diff itself is never invoked with an absent side.

pub mod json;
pub mod table;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::diff::{self, DailyDiff};
use crate::store::snapshot::{Slot, Snapshot};
use crate::store::SnapshotStore;

#[derive(Debug, Serialize)]
pub struct DailyReport {
    pub date: String,
    pub morning: Snapshot,
    pub evening: Snapshot,
    pub diff: DailyDiff,
    /// Narrative summary, present only when one was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Build the report for one day. Errors with the missing slot when either
/// snapshot has not been captured yet, so the caller can tell the admin
/// which capture to run.
pub fn daily(store: &dyn SnapshotStore, date: &str) -> Result<DailyReport> {
    let morning = store
        .get(date, Slot::Morning)?
        .ok_or_else(|| Error::MissingSnapshot {
            date: date.to_string(),
            slot: Slot::Morning,
        })?;
    let evening = store
        .get(date, Slot::Evening)?
        .ok_or_else(|| Error::MissingSnapshot {
            date: date.to_string(),
            slot: Slot::Evening,
        })?;

    let diff = diff::compare(&morning, &evening);

    Ok(DailyReport {
        date: date.to_string(),
        morning,
        evening,
        diff,
        summary: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Status};
    use crate::store::snapshot::SnapshotItem;
    use crate::store::SnapshotMeta;
    use std::collections::HashMap;

    /// In-memory stand-in for the sqlite store.
    #[derive(Default)]
    struct MemoryStore {
        snapshots: HashMap<(String, &'static str), Snapshot>,
    }

    impl SnapshotStore for MemoryStore {
        fn get(&self, date: &str, slot: Slot) -> Result<Option<Snapshot>> {
            Ok(self
                .snapshots
                .get(&(date.to_string(), slot.as_str()))
                .cloned())
        }

        fn put(&mut self, snapshot: &Snapshot) -> Result<()> {
            self.snapshots.insert(
                (snapshot.date.clone(), snapshot.slot.as_str()),
                snapshot.clone(),
            );
            Ok(())
        }

        fn list(&self) -> Result<Vec<SnapshotMeta>> {
            Ok(self
                .snapshots
                .values()
                .map(|s| SnapshotMeta {
                    date: s.date.clone(),
                    slot: s.slot,
                    total_items: s.total_items,
                    total_quantity: s.total_quantity,
                    created_at: s.created_at,
                })
                .collect())
        }
    }

    fn snap_item(id: &str, qty: u32) -> SnapshotItem {
        SnapshotItem {
            id: id.to_string(),
            name: format!("item {id}"),
            category: Category::Clothing,
            quantity: qty,
            status: Status::Available,
        }
    }

    fn snap(slot: Slot, items: Vec<SnapshotItem>) -> Snapshot {
        let total_quantity = items.iter().map(|i| u64::from(i.quantity)).sum();
        Snapshot {
            date: "2025-03-10".to_string(),
            slot,
            total_items: items.len(),
            total_quantity,
            items,
            created_at: 0,
        }
    }

    #[test]
    fn daily_pairs_snapshots_and_computes_diff() {
        let mut store = MemoryStore::default();
        store.put(&snap(Slot::Morning, vec![snap_item("1", 5)])).unwrap();
        store
            .put(&snap(Slot::Evening, vec![snap_item("1", 5), snap_item("2", 3)]))
            .unwrap();

        let report = daily(&store, "2025-03-10").unwrap();
        assert_eq!(report.diff.added.len(), 1);
        assert_eq!(report.diff.added[0].id, "2");
        assert!(report.summary.is_none());
    }

    #[test]
    fn daily_without_morning_names_the_missing_slot() {
        let mut store = MemoryStore::default();
        store.put(&snap(Slot::Evening, vec![])).unwrap();

        let err = daily(&store, "2025-03-10").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSnapshot {
                slot: Slot::Morning,
                ..
            }
        ));
    }

    #[test]
    fn daily_without_evening_names_the_missing_slot() {
        let mut store = MemoryStore::default();
        store.put(&snap(Slot::Morning, vec![])).unwrap();

        let err = daily(&store, "2025-03-10").unwrap_err();
        assert!(matches!(
            err,
            Error::MissingSnapshot {
                slot: Slot::Evening,
                ..
            }
        ));
    }

    #[test]
    fn daily_with_empty_snapshots_is_not_an_error() {
        let mut store = MemoryStore::default();
        store.put(&snap(Slot::Morning, vec![])).unwrap();
        store.put(&snap(Slot::Evening, vec![])).unwrap();

        let report = daily(&store, "2025-03-10").unwrap();
        assert!(report.diff.is_empty());
    }
}
