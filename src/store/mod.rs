//! SQLite persistence for the item catalog and daily snapshots.
//!
//! Two surfaces share one database file:
//! - items: the live catalog the admin commands edit
//! - snapshots + snapshot_items: frozen copies keyed by (date, slot)
//!
//! A snapshot written to an occupied (date, slot) key fully replaces the
//! old one; at most the two most recent snapshots per slot are kept.
//! Concurrent writers race last-write-wins with no conflict detection.

pub mod diff;
pub mod snapshot;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::catalog::{Category, Item, RawItem, Status};
use crate::error::{Error, Result};
use snapshot::{Slot, Snapshot, SnapshotItem};

/// Key-value surface for named snapshots. Injected into report building so
/// tests can run against an in-memory fake.
pub trait SnapshotStore {
    fn get(&self, date: &str, slot: Slot) -> Result<Option<Snapshot>>;
    fn put(&mut self, snapshot: &Snapshot) -> Result<()>;
    fn list(&self) -> Result<Vec<SnapshotMeta>>;
}

/// Result of a batch import: how many entries landed, and the reason for
/// each one that did not.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: Vec<String>,
}

/// Snapshot listing row: everything but the item list.
#[derive(Debug)]
pub struct SnapshotMeta {
    pub date: String,
    pub slot: Slot,
    pub total_items: usize,
    pub total_quantity: u64,
    pub created_at: i64,
}

/// Get the database path (~/.local/share/givebox/givebox.db or platform
/// equivalent)
fn default_db_path() -> Result<PathBuf> {
    let data_dir = directories::ProjectDirs::from("", "", "givebox")
        .ok_or_else(|| Error::Config("could not determine data directory".to_string()))?
        .data_dir()
        .to_path_buf();

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("givebox.db"))
}

fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            category TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            status TEXT NOT NULL,
            donated_by TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            slot TEXT NOT NULL,
            total_items INTEGER NOT NULL,
            total_quantity INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            UNIQUE(date, slot)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshot_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            snapshot_id INTEGER NOT NULL,
            item_id TEXT NOT NULL,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            status TEXT NOT NULL,
            FOREIGN KEY(snapshot_id) REFERENCES snapshots(id) ON DELETE CASCADE
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_snapshot_items_snapshot_id
         ON snapshot_items(snapshot_id)",
        [],
    )?;

    Ok(())
}

/// Database handle. Open once per command, reuse across all operations.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open_default() -> Result<Self> {
        Self::open_at(&default_db_path()?)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    // --- catalog ---

    pub fn insert_item(&mut self, item: &Item) -> Result<()> {
        self.conn.execute(
            "INSERT INTO items (id, name, description, category, quantity, status, donated_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                item.id,
                item.name,
                item.description,
                item.category.as_str(),
                item.quantity,
                item.status.as_str(),
                item.donated_by,
                item.created_at,
                item.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn get_item(&self, id: &str) -> Result<Option<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, category, quantity, status, donated_by, created_at, updated_at
             FROM items WHERE id = ?1",
        )?;
        let mut rows = stmt.query(params![id])?;

        if let Some(row) = rows.next()? {
            Ok(Some(item_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    /// All items, newest first.
    pub fn all_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, category, quantity, status, donated_by, created_at, updated_at
             FROM items ORDER BY created_at DESC, id ASC",
        )?;

        let items = stmt
            .query_map([], item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(items)
    }

    pub fn update_quantity(&mut self, id: &str, quantity: u32, now: i64) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE items SET quantity = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, quantity, now],
        )?;
        if updated == 0 {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn update_status(&mut self, id: &str, status: Status, now: i64) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE items SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), now],
        )?;
        if updated == 0 {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn delete_item(&mut self, id: &str) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(Error::ItemNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Validate and insert a batch of imported entries. Every entry is
    /// handled on its own: a validation failure or an id collision skips
    /// that entry with a reason and the rest still import, so re-running
    /// an import never aborts mid-file.
    pub fn import_items(&mut self, entries: Vec<RawItem>, now: i64) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();

        for entry in entries {
            match entry.validate(now) {
                Ok(item) => match self.insert_item(&item) {
                    Ok(()) => outcome.imported += 1,
                    Err(e) => outcome.skipped.push(format!("'{}': {e}", item.id)),
                },
                Err(e) => outcome.skipped.push(e.to_string()),
            }
        }

        outcome
    }

    /// Set the status of every id in one transaction. Returns the number of
    /// rows that matched; ids with no catalog row are skipped silently.
    pub fn bulk_update_status(&mut self, ids: &[String], status: Status, now: i64) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut affected = 0;
        {
            let mut stmt = tx.prepare_cached(
                "UPDATE items SET status = ?2, updated_at = ?3 WHERE id = ?1",
            )?;
            for id in ids {
                affected += stmt.execute(params![id, status.as_str(), now])?;
            }
        }
        tx.commit()?;
        Ok(affected)
    }

    /// Delete every id in one transaction. Returns the number of rows
    /// deleted.
    pub fn bulk_delete(&mut self, ids: &[String]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut affected = 0;
        {
            let mut stmt = tx.prepare_cached("DELETE FROM items WHERE id = ?1")?;
            for id in ids {
                affected += stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(affected)
    }
}

impl SnapshotStore for Store {
    fn get(&self, date: &str, slot: Slot) -> Result<Option<Snapshot>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, total_items, total_quantity, created_at
             FROM snapshots WHERE date = ?1 AND slot = ?2",
        )?;
        let mut rows = stmt.query(params![date, slot.as_str()])?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let snapshot_id: i64 = row.get(0)?;
        let total_items: i64 = row.get(1)?;
        let total_quantity: i64 = row.get(2)?;
        let created_at: i64 = row.get(3)?;

        let mut stmt = self.conn.prepare(
            "SELECT item_id, name, category, quantity, status
             FROM snapshot_items WHERE snapshot_id = ?1 ORDER BY id ASC",
        )?;
        let items = stmt
            .query_map(params![snapshot_id], snapshot_item_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Some(Snapshot {
            date: date.to_string(),
            slot,
            items,
            total_items: total_items.max(0) as usize,
            total_quantity: total_quantity.max(0) as u64,
            created_at,
        }))
    }

    /// Replace-on-write: any prior snapshot under the same (date, slot) is
    /// deleted first, then the two-most-recent-per-slot retention runs.
    fn put(&mut self, snapshot: &Snapshot) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM snapshots WHERE date = ?1 AND slot = ?2",
            params![snapshot.date, snapshot.slot.as_str()],
        )?;

        tx.execute(
            "INSERT INTO snapshots (date, slot, total_items, total_quantity, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot.date,
                snapshot.slot.as_str(),
                snapshot.total_items as i64,
                i64::try_from(snapshot.total_quantity).unwrap_or(i64::MAX),
                snapshot.created_at
            ],
        )?;

        let snapshot_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO snapshot_items (snapshot_id, item_id, name, category, quantity, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for item in &snapshot.items {
                stmt.execute(params![
                    snapshot_id,
                    item.id,
                    item.name,
                    item.category.as_str(),
                    item.quantity,
                    item.status.as_str()
                ])?;
            }
        }

        // retention: keep the two most recent snapshots per slot
        tx.execute(
            "DELETE FROM snapshots WHERE slot = ?1 AND id NOT IN (
                SELECT id FROM snapshots WHERE slot = ?1
                ORDER BY created_at DESC, id DESC LIMIT 2
            )",
            params![snapshot.slot.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<SnapshotMeta>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, slot, total_items, total_quantity, created_at
             FROM snapshots ORDER BY created_at DESC",
        )?;

        let metas = stmt
            .query_map([], |row| {
                let slot_str: String = row.get(1)?;
                Ok(SnapshotMeta {
                    date: row.get(0)?,
                    slot: Slot::parse(&slot_str).unwrap_or(Slot::Morning),
                    total_items: row.get::<_, i64>(2)?.max(0) as usize,
                    total_quantity: row.get::<_, i64>(3)?.max(0) as u64,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(metas)
    }
}

fn item_from_row(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    let category_str: String = row.get(3)?;
    let status_str: String = row.get(5)?;

    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: Category::parse(&category_str).unwrap_or(Category::Other),
        quantity: row.get::<_, i64>(4)?.max(0) as u32,
        status: Status::parse(&status_str).unwrap_or(Status::Available),
        donated_by: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn snapshot_item_from_row(row: &rusqlite::Row) -> rusqlite::Result<SnapshotItem> {
    let category_str: String = row.get(2)?;
    let status_str: String = row.get(4)?;

    Ok(SnapshotItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: Category::parse(&category_str).unwrap_or(Category::Other),
        quantity: row.get::<_, i64>(3)?.max(0) as u32,
        status: Status::parse(&status_str).unwrap_or(Status::Available),
    })
}
