//! JSON output for daily reports, for scripting and piping.

use super::DailyReport;

pub fn render(report: &DailyReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| String::from("{}"))
}
