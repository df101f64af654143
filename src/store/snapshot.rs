//! Point-in-time inventory snapshots.
//!
//! A snapshot is an immutable, labeled copy of the item list plus derived
//! totals. Capture is pure: the caller persists the result through the
//! store, fully replacing any earlier snapshot under the same (date, slot).

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Item, Status};

/// Which half of the day a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Morning,
    Evening,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Morning => "morning",
            Slot::Evening => "evening",
        }
    }

    pub fn parse(s: &str) -> Option<Slot> {
        match s {
            "morning" => Some(Slot::Morning),
            "evening" => Some(Slot::Evening),
            _ => None,
        }
    }

    pub fn other(&self) -> Slot {
        match self {
            Slot::Morning => Slot::Evening,
            Slot::Evening => Slot::Morning,
        }
    }

    /// Pick the slot for the given hour of day. Hours before the cutoff
    /// count as morning.
    pub fn for_hour(hour: u32, cutoff: u32) -> Slot {
        if hour < cutoff {
            Slot::Morning
        } else {
            Slot::Evening
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flat per-item record a snapshot keeps. Only the fields the diff
/// cares about; catalog bookkeeping (description, donor) is not copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub quantity: u32,
    pub status: Status,
}

impl From<&Item> for SnapshotItem {
    fn from(item: &Item) -> Self {
        SnapshotItem {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category,
            quantity: item.quantity,
            status: item.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Day key, YYYY-MM-DD.
    pub date: String,
    pub slot: Slot,
    pub items: Vec<SnapshotItem>,
    pub total_items: usize,
    pub total_quantity: u64,
    /// Unix seconds at the moment of capture.
    pub created_at: i64,
}

/// Capture the current item list as a snapshot. Total: cannot fail for any
/// input list; performs no I/O.
pub fn capture(items: &[Item], date: &str, slot: Slot, created_at: i64) -> Snapshot {
    let snapshot_items: Vec<SnapshotItem> = items.iter().map(SnapshotItem::from).collect();
    let total_quantity = snapshot_items.iter().map(|i| u64::from(i.quantity)).sum();

    Snapshot {
        date: date.to_string(),
        slot,
        total_items: snapshot_items.len(),
        total_quantity,
        items: snapshot_items,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, qty: u32) -> Item {
        Item {
            id: id.to_string(),
            name: format!("item {id}"),
            description: Some("ignored by snapshots".to_string()),
            category: Category::SchoolSupplies,
            quantity: qty,
            status: Status::Available,
            donated_by: Some("anonymous".to_string()),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn capture_totals_match_input_list() {
        let items = vec![item("a", 5), item("b", 3), item("c", 0)];
        let snap = capture(&items, "2025-03-10", Slot::Morning, 1000);

        assert_eq!(snap.total_items, 3);
        assert_eq!(snap.total_quantity, 8);
        assert_eq!(snap.items.len(), 3);
        assert_eq!(snap.date, "2025-03-10");
        assert_eq!(snap.created_at, 1000);
    }

    #[test]
    fn capture_empty_list_is_valid() {
        let snap = capture(&[], "2025-03-10", Slot::Evening, 0);
        assert_eq!(snap.total_items, 0);
        assert_eq!(snap.total_quantity, 0);
        assert!(snap.items.is_empty());
    }

    #[test]
    fn capture_copies_only_snapshot_fields() {
        let items = vec![item("a", 2)];
        let snap = capture(&items, "2025-03-10", Slot::Morning, 0);

        assert_eq!(snap.items[0].id, "a");
        assert_eq!(snap.items[0].quantity, 2);
        assert_eq!(snap.items[0].category, Category::SchoolSupplies);
    }

    #[test]
    fn slot_for_hour_respects_cutoff() {
        assert_eq!(Slot::for_hour(8, 14), Slot::Morning);
        assert_eq!(Slot::for_hour(13, 14), Slot::Morning);
        assert_eq!(Slot::for_hour(14, 14), Slot::Evening);
        assert_eq!(Slot::for_hour(22, 14), Slot::Evening);
    }
}
