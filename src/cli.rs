use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "givebox")]
#[command(about = "Donation inventory tracker for student giveaway programs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Snapshot the current inventory into today's morning or evening slot
    Capture(CaptureArgs),

    /// Show the daily change report, or list stored snapshots
    Report(ReportArgs),

    /// Manage catalog items
    #[command(subcommand)]
    Item(ItemCommand),

    /// Apply a status change or deletion to many items at once
    Bulk(BulkArgs),
}

#[derive(Parser)]
pub struct CaptureArgs {
    /// Slot to capture into: morning or evening (default: by current hour)
    #[arg(long)]
    pub slot: Option<String>,

    /// Day to record the snapshot under, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Day to report on, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Ask the configured summary endpoint for a narrative blurb
    #[arg(long, default_value_t = false)]
    pub summarize: bool,

    /// List stored snapshots instead of building a report
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

#[derive(Subcommand)]
pub enum ItemCommand {
    /// Add one item to the catalog
    Add(AddItemArgs),

    /// Change an item's quantity
    SetQuantity {
        id: String,
        quantity: u32,
    },

    /// Change an item's status: available, claimed or archived
    SetStatus {
        id: String,
        status: String,
    },

    /// Delete an item from the catalog
    Remove {
        id: String,
    },

    /// List catalog items
    List(ListItemArgs),

    /// Import items from a JSON file (array of item objects)
    Import {
        file: PathBuf,
    },
}

#[derive(Parser)]
pub struct AddItemArgs {
    pub id: String,
    pub name: String,

    /// school_supplies, clothing, food, hygiene or other
    #[arg(long, default_value = "other")]
    pub category: String,

    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub donated_by: Option<String>,
}

#[derive(Parser)]
pub struct ListItemArgs {
    /// Only show items with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct BulkArgs {
    /// Item ids to operate on
    #[arg(long, value_delimiter = ',', required_unless_present = "all", conflicts_with = "all")]
    pub ids: Vec<String>,

    /// Operate on every item in the catalog
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Set every selected item to this status
    #[arg(long, conflicts_with = "delete")]
    pub status: Option<String>,

    /// Delete every selected item
    #[arg(long, default_value_t = false)]
    pub delete: bool,
}
