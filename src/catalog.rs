//! Donated item catalog types.
//!
//! Items are the unit of inventory: what was donated, how many, and whether
//! students can still claim it. The snapshot engine reads these but never
//! writes them.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SchoolSupplies,
    Clothing,
    Food,
    Hygiene,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SchoolSupplies => "school_supplies",
            Category::Clothing => "clothing",
            Category::Food => "food",
            Category::Hygiene => "hygiene",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::SchoolSupplies => "School Supplies",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
            Category::Hygiene => "Hygiene",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "school_supplies" => Some(Category::SchoolSupplies),
            "clothing" => Some(Category::Clothing),
            "food" => Some(Category::Food),
            "hygiene" => Some(Category::Hygiene),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Available,
    Claimed,
    Archived,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::Claimed => "claimed",
            Status::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "available" => Some(Status::Available),
            "claimed" => Some(Status::Claimed),
            "archived" => Some(Status::Archived),
            _ => None,
        }
    }
}

/// A catalog entry. The snapshot engine only looks at id, name, category,
/// quantity and status; the rest is bookkeeping for the admin commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub quantity: u32,
    pub status: Status,
    pub donated_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Shape of an item as it arrives from `item import` json, before
/// validation. Everything optional so a malformed entry is reported with a
/// reason instead of a serde type error.
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub status: Option<String>,
    pub donated_by: Option<String>,
}

impl RawItem {
    /// Validate an imported entry. Missing id or name rejects the entry;
    /// missing quantity is coerced to 0; missing status defaults to
    /// available; unknown category or status strings reject.
    pub fn validate(self, now: i64) -> Result<Item> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                return Err(Error::MalformedItem {
                    id: None,
                    reason: "missing or empty id".to_string(),
                })
            }
        };

        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(Error::MalformedItem {
                    id: Some(id),
                    reason: "missing or empty name".to_string(),
                })
            }
        };

        let category = match &self.category {
            Some(c) => Category::parse(c).ok_or_else(|| Error::MalformedItem {
                id: Some(id.clone()),
                reason: format!("unknown category '{c}'"),
            })?,
            None => Category::Other,
        };

        let status = match &self.status {
            Some(s) => Status::parse(s).ok_or_else(|| Error::MalformedItem {
                id: Some(id.clone()),
                reason: format!("unknown status '{s}'"),
            })?,
            None => Status::Available,
        };

        Ok(Item {
            id,
            name,
            description: self.description,
            category,
            quantity: self.quantity.unwrap_or(0),
            status,
            donated_by: self.donated_by,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Bulk-selection model: which item ids are currently checked. Pure
/// bookkeeping; the store applies the resulting id set in one transaction.
#[derive(Debug, Default)]
pub struct Selection {
    ids: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// Check an id, or uncheck it if already selected.
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.ids.iter().position(|i| i == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }
    }

    /// Select every visible item, or clear if all of them are already
    /// selected (the select-all / deselect-all toggle).
    pub fn toggle_all(&mut self, visible: &[Item]) {
        if self.ids.len() == visible.len() && visible.iter().all(|i| self.contains(&i.id)) {
            self.ids.clear();
        } else {
            self.ids = visible.iter().map(|i| i.id.clone()).collect();
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
