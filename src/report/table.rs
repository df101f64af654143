//! Text rendering for the daily report.
//!
//! Sections mirror the admin panel: added, removed/claimed, quantity
//! changes, each line carrying the category label and a signed quantity.

use super::DailyReport;

pub fn render(report: &DailyReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Daily report for {}\n", report.date));
    output.push_str(&format!(
        "  morning: {} items, {} units\n",
        report.morning.total_items, report.morning.total_quantity
    ));
    output.push_str(&format!(
        "  evening: {} items, {} units\n",
        report.evening.total_items, report.evening.total_quantity
    ));

    if report.diff.is_empty() {
        output.push_str("\nNo changes detected.\n");
    } else {
        if !report.diff.added.is_empty() {
            output.push_str(&format!("\nItems added ({})\n", report.diff.added.len()));
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for item in &report.diff.added {
                output.push_str(&format!(
                    "  {:30} {:>6}  [{}]\n",
                    truncate(&item.name, 30),
                    format!("+{}", item.quantity),
                    item.category.label()
                ));
            }
        }

        if !report.diff.removed.is_empty() {
            output.push_str(&format!(
                "\nItems removed/claimed ({})\n",
                report.diff.removed.len()
            ));
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for item in &report.diff.removed {
                output.push_str(&format!(
                    "  {:30} {:>6}  [{}]\n",
                    truncate(&item.name, 30),
                    format!("-{}", item.quantity),
                    item.category.label()
                ));
            }
        }

        if !report.diff.changed.is_empty() {
            output.push_str(&format!(
                "\nQuantity changes ({})\n",
                report.diff.changed.len()
            ));
            output.push_str(&"-".repeat(40));
            output.push('\n');
            for change in &report.diff.changed {
                let sign = if change.change > 0 { "+" } else { "" };
                output.push_str(&format!(
                    "  {:30} {:>6}  [{}]\n",
                    truncate(&change.item.name, 30),
                    format!("{sign}{}", change.change),
                    change.item.category.label()
                ));
            }
        }

        output.push_str(&format!(
            "\n{} change(s) total\n",
            report.diff.change_count()
        ));
    }

    if let Some(summary) = &report.summary {
        output.push_str("\nSummary\n");
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(summary);
        output.push('\n');
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Status};
    use crate::store::diff::{DailyDiff, QuantityChange};
    use crate::store::snapshot::{Slot, Snapshot, SnapshotItem};

    fn snap(slot: Slot) -> Snapshot {
        Snapshot {
            date: "2025-03-10".to_string(),
            slot,
            items: vec![],
            total_items: 4,
            total_quantity: 12,
            created_at: 0,
        }
    }

    fn report(diff: DailyDiff) -> DailyReport {
        DailyReport {
            date: "2025-03-10".to_string(),
            morning: snap(Slot::Morning),
            evening: snap(Slot::Evening),
            diff,
            summary: None,
        }
    }

    fn snap_item(name: &str, qty: u32) -> SnapshotItem {
        SnapshotItem {
            id: name.to_string(),
            name: name.to_string(),
            category: Category::Food,
            quantity: qty,
            status: Status::Available,
        }
    }

    #[test]
    fn empty_diff_says_no_changes() {
        let out = render(&report(DailyDiff {
            added: vec![],
            removed: vec![],
            changed: vec![],
        }));
        assert!(out.contains("No changes detected."));
        assert!(out.contains("morning: 4 items, 12 units"));
    }

    #[test]
    fn sections_show_signed_quantities() {
        let out = render(&report(DailyDiff {
            added: vec![snap_item("rice", 3)],
            removed: vec![snap_item("soap", 2)],
            changed: vec![QuantityChange {
                item: snap_item("pens", 8),
                change: -4,
            }],
        }));

        assert!(out.contains("Items added (1)"));
        assert!(out.contains("+3"));
        assert!(out.contains("Items removed/claimed (1)"));
        assert!(out.contains("-2"));
        assert!(out.contains("Quantity changes (1)"));
        assert!(out.contains("-4"));
        assert!(out.contains("3 change(s) total"));
    }

    #[test]
    fn summary_section_rendered_when_present() {
        let mut r = report(DailyDiff {
            added: vec![],
            removed: vec![],
            changed: vec![],
        });
        r.summary = Some("A quiet day.".to_string());

        let out = render(&r);
        assert!(out.contains("Summary"));
        assert!(out.contains("A quiet day."));
    }

    #[test]
    fn long_names_truncated() {
        let long = "a".repeat(64);
        let out = render(&report(DailyDiff {
            added: vec![snap_item(&long, 1)],
            removed: vec![],
            changed: vec![],
        }));
        assert!(out.contains("..."));
        assert!(!out.contains(&long));
    }
}
