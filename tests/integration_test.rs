use givebox::catalog::{Category, Item, Selection, Status};
use givebox::error::Error;
use givebox::report;
use givebox::store::snapshot::{capture, Slot};
use givebox::store::{SnapshotStore, Store};

fn item(id: &str, name: &str, category: Category, qty: u32) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        category,
        quantity: qty,
        status: Status::Available,
        donated_by: None,
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn full_day_capture_and_report_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("givebox.db");
    let mut store = Store::open_at(&db_path).unwrap();

    // morning inventory
    store
        .insert_item(&item("rice", "Rice 5kg", Category::Food, 4))
        .unwrap();
    store
        .insert_item(&item("soap", "Bath soap", Category::Hygiene, 10))
        .unwrap();
    store
        .insert_item(&item("pens", "Ballpens", Category::SchoolSupplies, 20))
        .unwrap();

    let morning = capture(&store.all_items().unwrap(), "2025-03-10", Slot::Morning, 100);
    store.put(&morning).unwrap();

    // the day happens: soap claimed out, pens partially claimed,
    // a clothing donation arrives
    store.delete_item("soap").unwrap();
    store.update_quantity("pens", 12, 200).unwrap();
    store
        .insert_item(&item("shirts", "T-shirts", Category::Clothing, 6))
        .unwrap();

    let evening = capture(&store.all_items().unwrap(), "2025-03-10", Slot::Evening, 300);
    store.put(&evening).unwrap();

    // reopen the database to prove the snapshots survived
    drop(store);
    let store = Store::open_at(&db_path).unwrap();

    let daily = report::daily(&store, "2025-03-10").unwrap();

    assert_eq!(daily.morning.total_items, 3);
    assert_eq!(daily.morning.total_quantity, 34);
    assert_eq!(daily.evening.total_items, 3);
    assert_eq!(daily.evening.total_quantity, 22);

    assert_eq!(daily.diff.added.len(), 1);
    assert_eq!(daily.diff.added[0].id, "shirts");

    assert_eq!(daily.diff.removed.len(), 1);
    assert_eq!(daily.diff.removed[0].id, "soap");
    assert_eq!(daily.diff.removed[0].quantity, 10);

    assert_eq!(daily.diff.changed.len(), 1);
    assert_eq!(daily.diff.changed[0].item.id, "pens");
    assert_eq!(daily.diff.changed[0].change, -8);

    let text = report::table::render(&daily);
    assert!(text.contains("Items added (1)"));
    assert!(text.contains("T-shirts"));
    assert!(text.contains("3 change(s) total"));

    let json = report::json::render(&daily);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["diff"]["removed"][0]["id"], "soap");
}

#[test]
fn report_before_evening_capture_names_missing_slot() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .insert_item(&item("rice", "Rice 5kg", Category::Food, 4))
        .unwrap();

    let morning = capture(&store.all_items().unwrap(), "2025-03-10", Slot::Morning, 100);
    store.put(&morning).unwrap();

    let err = report::daily(&store, "2025-03-10").unwrap_err();
    match err {
        Error::MissingSnapshot { date, slot } => {
            assert_eq!(date, "2025-03-10");
            assert_eq!(slot, Slot::Evening);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn recapture_same_slot_replaces_previous_snapshot() {
    let mut store = Store::open_in_memory().unwrap();
    store
        .insert_item(&item("rice", "Rice 5kg", Category::Food, 4))
        .unwrap();

    let first = capture(&store.all_items().unwrap(), "2025-03-10", Slot::Morning, 100);
    store.put(&first).unwrap();

    store.update_quantity("rice", 9, 150).unwrap();
    let second = capture(&store.all_items().unwrap(), "2025-03-10", Slot::Morning, 200);
    store.put(&second).unwrap();

    let loaded = store.get("2025-03-10", Slot::Morning).unwrap().unwrap();
    assert_eq!(loaded.created_at, 200);
    assert_eq!(loaded.items[0].quantity, 9);
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn bulk_operations_apply_in_one_pass() {
    let mut store = Store::open_in_memory().unwrap();
    for id in ["a", "b", "c"] {
        store
            .insert_item(&item(id, id, Category::Other, 1))
            .unwrap();
    }

    let ids: Vec<String> = vec!["a".into(), "b".into()];
    assert_eq!(
        store.bulk_update_status(&ids, Status::Archived, 10).unwrap(),
        2
    );

    let archived = store
        .all_items()
        .unwrap()
        .into_iter()
        .filter(|i| i.status == Status::Archived)
        .count();
    assert_eq!(archived, 2);

    assert_eq!(store.bulk_delete(&ids).unwrap(), 2);
    assert_eq!(store.all_items().unwrap().len(), 1);
}

#[test]
fn select_all_then_bulk_archive_covers_whole_catalog() {
    let mut store = Store::open_in_memory().unwrap();
    for id in ["a", "b", "c"] {
        store
            .insert_item(&item(id, id, Category::Other, 1))
            .unwrap();
    }

    let mut selection = Selection::new();
    selection.toggle_all(&store.all_items().unwrap());
    assert_eq!(selection.len(), 3);

    let affected = store
        .bulk_update_status(selection.ids(), Status::Archived, 10)
        .unwrap();
    assert_eq!(affected, 3);
    assert!(store
        .all_items()
        .unwrap()
        .iter()
        .all(|i| i.status == Status::Archived));
}
