//! Narrative summary of a daily report.
//!
//! The diff is sent to a generateContent-style text endpoint which returns
//! a short blurb about the day's distribution activity. The call is
//! best-effort: every failure maps to `Error::SummaryUnavailable` and the
//! caller substitutes a local fallback, so the diff output never depends
//! on the endpoint being reachable.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::report::DailyReport;
use crate::store::diff::{DailyDiff, QuantityChange};
use crate::store::snapshot::SnapshotItem;

/// Shown when the endpoint fails or returns no usable text.
pub const UNAVAILABLE_TEXT: &str = "Unable to generate analysis.";

/// Wire payload for the summary request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub date: String,
    pub morning_total: usize,
    pub evening_total: usize,
    pub morning_quantity: u64,
    pub evening_quantity: u64,
    pub added: Vec<SnapshotItem>,
    pub removed: Vec<SnapshotItem>,
    pub changed: Vec<QuantityChange>,
}

impl SummaryRequest {
    pub fn from_report(report: &DailyReport) -> Self {
        SummaryRequest {
            date: report.date.clone(),
            morning_total: report.morning.total_items,
            evening_total: report.evening.total_items,
            morning_quantity: report.morning.total_quantity,
            evening_quantity: report.evening.total_quantity,
            added: report.diff.added.clone(),
            removed: report.diff.removed.clone(),
            changed: report.diff.changed.clone(),
        }
    }
}

pub fn build_prompt(req: &SummaryRequest) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are an assistant for a student donation inventory system. \
         Analyze this daily inventory report and provide helpful insights.\n\n",
    );
    prompt.push_str(&format!("DATE: {}\n\n", req.date));
    prompt.push_str(&format!(
        "MORNING INVENTORY:\n- Total item types: {}\n- Total quantity: {}\n\n",
        req.morning_total, req.morning_quantity
    ));
    prompt.push_str(&format!(
        "EVENING INVENTORY:\n- Total item types: {}\n- Total quantity: {}\n\n",
        req.evening_total, req.evening_quantity
    ));
    prompt.push_str("CHANGES TODAY:\n");

    if req.added.is_empty() {
        prompt.push_str("No items added.\n");
    } else {
        prompt.push_str(&format!("Items Added ({}):\n", req.added.len()));
        for item in &req.added {
            prompt.push_str(&format!(
                "- {} ({}): {} units\n",
                item.name,
                item.category.label(),
                item.quantity
            ));
        }
    }

    if req.removed.is_empty() {
        prompt.push_str("No items removed.\n");
    } else {
        prompt.push_str(&format!("Items Removed/Claimed ({}):\n", req.removed.len()));
        for item in &req.removed {
            prompt.push_str(&format!(
                "- {} ({}): {} units\n",
                item.name,
                item.category.label(),
                item.quantity
            ));
        }
    }

    if req.changed.is_empty() {
        prompt.push_str("No quantity changes.\n");
    } else {
        prompt.push_str(&format!("Quantity Changes ({}):\n", req.changed.len()));
        for change in &req.changed {
            let sign = if change.change > 0 { "+" } else { "" };
            prompt.push_str(&format!(
                "- {}: {sign}{} units\n",
                change.item.name, change.change
            ));
        }
    }

    prompt.push_str(
        "\nPlease provide:\n\
         1. A brief summary of today's distribution activity (2-3 sentences)\n\
         2. Key insights about what categories were most popular\n\
         3. One actionable recommendation for the team\n\n\
         Keep the response concise, friendly, and helpful. \
         Response should be under 150 words.",
    );

    prompt
}

// generateContent request/response shapes, reduced to the fields we use

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|t| !t.trim().is_empty())
}

pub struct SummaryClient {
    endpoint: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl SummaryClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        SummaryClient {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// One request, no retry. The admin can re-run `report --summarize` if
    /// the endpoint was briefly down.
    pub fn generate(&self, req: &SummaryRequest) -> Result<String> {
        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(req)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                max_output_tokens: 300,
            },
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(Duration::from_secs(30))
            .send()
            .map_err(|e| Error::SummaryUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SummaryUnavailable(format!(
                "endpoint returned {status}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| Error::SummaryUnavailable(e.to_string()))?;

        extract_text(parsed)
            .ok_or_else(|| Error::SummaryUnavailable("no text in response".to_string()))
    }
}

/// Produce the summary text for a report. With a client, the endpoint is
/// asked once and any failure degrades to the fixed unavailable string;
/// with no client configured, the local heuristic blurb is used instead.
/// Never fails: the report's diff is untouched either way.
pub fn summarize(client: Option<&SummaryClient>, report: &DailyReport) -> String {
    match client {
        Some(client) => match client.generate(&SummaryRequest::from_report(report)) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("warning: {e}");
                UNAVAILABLE_TEXT.to_string()
            }
        },
        None => fallback_summary(&report.diff),
    }
}

/// Local heuristic blurb used when no endpoint is configured, mirroring
/// what the diff itself can tell about the day.
pub fn fallback_summary(diff: &DailyDiff) -> String {
    if !diff.removed.is_empty() {
        format!(
            "Great distribution day! {} item type(s) were claimed by students. {} total items distributed.",
            diff.removed.len(),
            diff.removed_quantity()
        )
    } else if !diff.added.is_empty() {
        format!(
            "{} new item(s) added to inventory today. Ready for distribution!",
            diff.added.len()
        )
    } else {
        "No significant changes detected today.".to_string()
    }
}
