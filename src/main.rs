use chrono::Timelike;
use clap::Parser;

use givebox::catalog::{Item, RawItem, Selection, Status};
use givebox::cli::{BulkArgs, CaptureArgs, Cli, Command, ItemCommand, ReportArgs};
use givebox::config::Config;
use givebox::error::Error;
use givebox::store::snapshot::{self, Slot};
use givebox::store::{SnapshotStore, Store};
use givebox::summary::{self, SummaryClient};
use givebox::{report, Result};

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening database: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Capture(args) => run_capture(store, &config, &args),
        Command::Report(args) => run_report(store, &config, &args),
        Command::Item(command) => run_item(store, &command),
        Command::Bulk(args) => run_bulk(store, &args),
    };

    if let Err(e) = result {
        match &e {
            Error::MissingSnapshot { date, slot } => {
                eprintln!("No {slot} snapshot captured for {date}.");
                eprintln!("Run 'givebox capture --slot {slot} --date {date}' first.");
            }
            _ => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}

fn open_store(config: &Config) -> Result<Store> {
    match &config.db_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Store::open_at(path)
        }
        None => Store::open_default(),
    }
}

fn parse_date(arg: &Option<String>) -> String {
    match arg {
        Some(raw) => match chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => {
                eprintln!("Invalid date '{raw}'. Expected YYYY-MM-DD.");
                std::process::exit(1);
            }
        },
        None => chrono::Local::now().format("%Y-%m-%d").to_string(),
    }
}

fn parse_slot(arg: &Option<String>, cutoff: u32) -> Slot {
    match arg {
        Some(raw) => match Slot::parse(raw) {
            Some(slot) => slot,
            None => {
                eprintln!("Invalid slot '{raw}'. Expected 'morning' or 'evening'.");
                std::process::exit(1);
            }
        },
        None => Slot::for_hour(chrono::Local::now().hour(), cutoff),
    }
}

fn parse_status(raw: &str) -> Status {
    match Status::parse(raw) {
        Some(status) => status,
        None => {
            eprintln!("Invalid status '{raw}'. Expected available, claimed or archived.");
            std::process::exit(1);
        }
    }
}

fn run_capture(mut store: Store, config: &Config, args: &CaptureArgs) -> Result<()> {
    let date = parse_date(&args.date);
    let slot = parse_slot(&args.slot, config.morning_cutoff_hour);

    let items = store.all_items()?;
    let snap = snapshot::capture(&items, &date, slot, chrono::Utc::now().timestamp());

    let replacing = store.get(&date, slot)?.is_some();
    store.put(&snap)?;

    if replacing {
        println!("Replaced {slot} snapshot for {date}.");
    } else {
        println!("Saved {slot} snapshot for {date}.");
    }
    println!(
        "  {} item(s), {} unit(s) total",
        snap.total_items, snap.total_quantity
    );

    // nudge toward the report once both halves of the day exist
    if store.get(&date, slot.other())?.is_some() {
        println!("Both snapshots captured. Run 'givebox report --date {date}' to compare.");
    }

    Ok(())
}

fn run_report(store: Store, config: &Config, args: &ReportArgs) -> Result<()> {
    if args.list {
        let metas = store.list()?;
        if metas.is_empty() {
            println!("No snapshots found. Run 'givebox capture' to create one.");
            return Ok(());
        }

        println!("Snapshots:");
        println!("{:<12} {:<9} {:<8} {:<8} {:<20}", "Date", "Slot", "Items", "Units", "Captured");
        println!("{}", "-".repeat(60));
        for meta in metas {
            let captured = chrono::DateTime::from_timestamp(meta.created_at, 0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!(
                "{:<12} {:<9} {:<8} {:<8} {:<20}",
                meta.date,
                meta.slot.as_str(),
                meta.total_items,
                meta.total_quantity,
                captured
            );
        }
        return Ok(());
    }

    let date = parse_date(&args.date);
    let mut daily = report::daily(&store, &date)?;

    if args.summarize {
        // no key configured means no network call; the local heuristic
        // blurb is used instead
        let client = config
            .api_key
            .as_ref()
            .map(|key| SummaryClient::new(&config.summary_endpoint, key));
        daily.summary = Some(summary::summarize(client.as_ref(), &daily));
    }

    if args.json {
        println!("{}", report::json::render(&daily));
    } else {
        print!("{}", report::table::render(&daily));
    }

    Ok(())
}

fn run_item(mut store: Store, command: &ItemCommand) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    match command {
        ItemCommand::Add(args) => {
            let raw = RawItem {
                id: Some(args.id.clone()),
                name: Some(args.name.clone()),
                description: args.description.clone(),
                category: Some(args.category.clone()),
                quantity: Some(args.quantity),
                status: Some(Status::Available.as_str().to_string()),
                donated_by: args.donated_by.clone(),
            };
            let item = raw.validate(now)?;
            store.insert_item(&item)?;
            println!("Added '{}' ({} unit(s)).", item.name, item.quantity);
        }
        ItemCommand::SetQuantity { id, quantity } => {
            store.update_quantity(id, *quantity, now)?;
            println!("Set quantity of '{id}' to {quantity}.");
        }
        ItemCommand::SetStatus { id, status } => {
            let status = parse_status(status);
            store.update_status(id, status, now)?;
            println!("Set status of '{id}' to {}.", status.as_str());
        }
        ItemCommand::Remove { id } => {
            store.delete_item(id)?;
            println!("Removed '{id}'.");
        }
        ItemCommand::List(args) => {
            let status_filter = args.status.as_deref().map(parse_status);
            let items: Vec<Item> = store
                .all_items()?
                .into_iter()
                .filter(|i| status_filter.map_or(true, |s| i.status == s))
                .collect();

            if args.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&items).unwrap_or_else(|_| String::from("[]"))
                );
            } else if items.is_empty() {
                println!("No items found.");
            } else {
                print_item_table(&items);
            }
        }
        ItemCommand::Import { file } => {
            let raw = std::fs::read_to_string(file)?;
            let entries: Vec<RawItem> = serde_json::from_str(&raw)?;

            let outcome = store.import_items(entries, now);
            for reason in &outcome.skipped {
                eprintln!("skipping entry: {reason}");
            }
            println!(
                "Imported {} item(s), skipped {}.",
                outcome.imported,
                outcome.skipped.len()
            );
        }
    }

    Ok(())
}

fn run_bulk(mut store: Store, args: &BulkArgs) -> Result<()> {
    // reuse the selection model so dedup/ordering matches the admin panel
    let mut selection = Selection::new();
    if args.all {
        selection.toggle_all(&store.all_items()?);
        if selection.is_empty() {
            println!("No items in the catalog.");
            return Ok(());
        }
    } else {
        for id in &args.ids {
            if !selection.contains(id) {
                selection.toggle(id);
            }
        }
    }

    if let Some(raw) = &args.status {
        let status = parse_status(raw);
        let affected =
            store.bulk_update_status(selection.ids(), status, chrono::Utc::now().timestamp())?;
        println!(
            "Updated {affected} of {} selected item(s) to {}.",
            selection.len(),
            status.as_str()
        );
    } else if args.delete {
        let affected = store.bulk_delete(selection.ids())?;
        println!("Deleted {affected} of {} selected item(s).", selection.len());
    } else {
        eprintln!("Nothing to do: pass --status <status> or --delete.");
        std::process::exit(1);
    }

    Ok(())
}

fn print_item_table(items: &[Item]) {
    println!(
        "{:<14} {:<28} {:<16} {:>5}  {:<9}",
        "ID", "Name", "Category", "Qty", "Status"
    );
    println!("{}", "-".repeat(78));
    for item in items {
        println!(
            "{:<14} {:<28} {:<16} {:>5}  {:<9}",
            truncate(&item.id, 14),
            truncate(&item.name, 28),
            item.category.label(),
            item.quantity,
            item.status.as_str()
        );
    }
    println!("{} item(s)", items.len());
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}
