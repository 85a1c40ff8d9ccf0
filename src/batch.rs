//! Batch input handling: company name lists from CSV/JSON files, and the
//! run summary assembled after a batch completes.
//!
//! Supported inputs:
//! - CSV with an "empresa" or "company" column (header sniffed), or one
//!   name per line with `#` comments
//! - JSON array of name strings, array of objects with an "empresa"/"name"
//!   field, or an object with a "companies" array

use anyhow::{bail, Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::company::ResolutionOutcome;

/// Input format for company list files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    /// Detect format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase()).as_deref() {
            Some("csv") => Some(Self::Csv),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse a company list from a file, auto-detecting the format.
pub fn parse_company_file(path: &Path) -> Result<Vec<String>> {
    let format = InputFormat::from_path(path).with_context(|| {
        format!(
            "Cannot determine input format from file extension. Expected .csv or .json: {}",
            path.display()
        )
    })?;

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    match format {
        InputFormat::Csv => parse_csv_companies(&content),
        InputFormat::Json => parse_json_companies(&content),
    }
}

/// Parse company names from CSV content.
pub fn parse_csv_companies(content: &str) -> Result<Vec<String>> {
    let mut companies = Vec::new();
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() {
        return Ok(companies);
    }

    let first_line = lines[0].to_lowercase();
    let has_header = first_line.contains("empresa") || first_line.contains("company");

    if has_header {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers().context("Failed to read CSV headers")?.clone();
        let name_idx = headers
            .iter()
            .position(|h| {
                let h = h.to_lowercase();
                h == "empresa" || h == "company" || h == "name"
            })
            .context("CSV must have an 'empresa' or 'company' column when using headers")?;

        for record in reader.records() {
            let record = record.context("Failed to parse CSV record")?;
            if let Some(name) = record.get(name_idx).map(str::trim).filter(|s| !s.is_empty()) {
                companies.push(name.to_string());
            }
        }
    } else {
        for line in lines {
            // Without headers, the first column is the company name.
            let name = line.split(',').next().unwrap_or(line).trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            companies.push(name.to_string());
        }
    }

    Ok(companies)
}

/// Parse company names from JSON content.
pub fn parse_json_companies(content: &str) -> Result<Vec<String>> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Failed to parse JSON content")?;

    let entries = match &value {
        serde_json::Value::Array(arr) => parse_json_array(arr),

        serde_json::Value::Object(obj) => match obj.get("companies") {
            Some(serde_json::Value::Array(arr)) => parse_json_array(arr),
            Some(_) => bail!("'companies' field must be an array"),
            None => bail!("JSON object must have a 'companies' array field"),
        },

        _ => bail!("JSON must be an array of company names or an object with 'companies'"),
    };

    Ok(entries)
}

fn parse_json_array(arr: &[serde_json::Value]) -> Vec<String> {
    let mut entries = Vec::new();

    for item in arr {
        match item {
            serde_json::Value::String(name) => {
                let name = name.trim();
                if !name.is_empty() {
                    entries.push(name.to_string());
                }
            }
            serde_json::Value::Object(obj) => {
                let name = obj
                    .get("empresa")
                    .or_else(|| obj.get("name"))
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty());
                if let Some(name) = name {
                    entries.push(name.to_string());
                }
            }
            _ => {
                // Skip entries that are neither strings nor objects.
            }
        }
    }

    entries
}

/// Summary of a batch resolution run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total_companies: usize,
    pub complete: usize,
    pub failed: usize,
    pub total_links: usize,
    pub outcomes: Vec<ResolutionOutcome>,
    pub started_at: String,
    pub completed_at: String,
}

/// Start a new batch summary stamped with the current time.
pub fn new_batch_summary() -> BatchSummary {
    BatchSummary {
        total_companies: 0,
        complete: 0,
        failed: 0,
        total_links: 0,
        outcomes: Vec::new(),
        started_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        completed_at: String::new(),
    }
}

/// Fill in the derived counts and the end timestamp.
pub fn finalize_batch_summary(summary: &mut BatchSummary) {
    summary.completed_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    summary.total_companies = summary.outcomes.len();
    summary.complete = summary.outcomes.iter().filter(|o| o.is_complete()).count();
    summary.failed = summary.outcomes.iter().filter(|o| !o.is_complete()).count();
    summary.total_links = summary.outcomes.iter().map(|o| o.links.len()).sum();
}
