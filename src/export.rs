//! Export of resolution outcomes to CSV and JSON, plus the terminal summary
//! printed after a batch.

use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write as _;
use tracing::{debug, info};

use crate::batch::BatchSummary;
use crate::company::{ResolutionOutcome, ResolutionStatus};

/// Write one CSV row per resolved link; companies with no links (error
/// outcomes) still get a row so the output covers every input.
pub fn export_csv(outcomes: &[ResolutionOutcome], output_path: &str) -> Result<()> {
    debug!("Exporting {} outcomes to CSV: {output_path}", outcomes.len());

    let file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {output_path}"))?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["Company", "Status", "Link", "Title", "Domain", "Message"])?;

    for outcome in outcomes {
        let status = status_label(outcome.status);
        let message = outcome.message.as_deref().unwrap_or("");

        if outcome.links.is_empty() {
            writer.write_record([outcome.company_name.as_str(), status, "", "", "", message])?;
            continue;
        }

        for link in &outcome.links {
            writer.write_record([
                outcome.company_name.as_str(),
                status,
                link.link.as_str(),
                link.title.as_str(),
                link.domain.as_str(),
                message,
            ])?;
        }
    }

    writer.flush()?;
    info!("Exported {} outcomes to CSV: {output_path}", outcomes.len());
    Ok(())
}

#[derive(Serialize)]
struct JsonExport<'a> {
    summary: ExportSummary,
    results: &'a [ResolutionOutcome],
}

#[derive(Serialize)]
struct ExportSummary {
    total_companies: usize,
    complete: usize,
    failed: usize,
    total_links: usize,
}

/// Write all outcomes as pretty JSON with a summary header.
pub fn export_json(outcomes: &[ResolutionOutcome], output_path: &str) -> Result<()> {
    debug!("Exporting {} outcomes to JSON: {output_path}", outcomes.len());

    let export = JsonExport {
        summary: ExportSummary {
            total_companies: outcomes.len(),
            complete: outcomes.iter().filter(|o| o.is_complete()).count(),
            failed: outcomes.iter().filter(|o| !o.is_complete()).count(),
            total_links: outcomes.iter().map(|o| o.links.len()).sum(),
        },
        results: outcomes,
    };

    let json = serde_json::to_string_pretty(&export).context("Failed to serialize outcomes")?;

    let mut file = File::create(output_path)
        .with_context(|| format!("Failed to create output file: {output_path}"))?;
    file.write_all(json.as_bytes())?;

    info!("Exported {} outcomes to JSON: {output_path}", outcomes.len());
    Ok(())
}

fn status_label(status: ResolutionStatus) -> &'static str {
    match status {
        ResolutionStatus::Complete => "complete",
        ResolutionStatus::Error => "error",
    }
}

/// Print a human-readable batch summary to stdout.
pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    println!("Resolution summary");
    println!("  Companies processed: {}", summary.total_companies);
    println!("  Complete:            {}", summary.complete);
    println!("  Failed:              {}", summary.failed);
    println!("  Links found:         {}", summary.total_links);

    let suggested = summary
        .outcomes
        .iter()
        .flat_map(|o| &o.links)
        .filter(|l| l.title.contains("Site Sugerido"))
        .count();
    if suggested > 0 {
        println!("  Suggested (unconfirmed) links: {suggested}");
    }

    for outcome in summary.outcomes.iter().filter(|o| !o.is_complete()) {
        println!(
            "  ! {}: {}",
            outcome.company_name,
            outcome.message.as_deref().unwrap_or("unknown error")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CandidateResult;

    fn outcome_with_links() -> ResolutionOutcome {
        ResolutionOutcome::complete(
            "Acme",
            vec![
                CandidateResult {
                    title: "Acme - Site Oficial".to_string(),
                    link: "https://acme.com.br".to_string(),
                    snippet: "Site oficial".to_string(),
                    domain: "acme.com.br".to_string(),
                },
                CandidateResult {
                    title: "Acme".to_string(),
                    link: "https://acme.com".to_string(),
                    snippet: String::new(),
                    domain: "acme.com".to_string(),
                },
            ],
        )
    }

    #[test]
    fn test_export_csv_one_row_per_link() {
        let dir = std::env::temp_dir().join("sitefinder_export_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.csv");
        let path_str = path.to_str().unwrap();

        let outcomes = vec![outcome_with_links(), ResolutionOutcome::error("Beta", "boom")];
        export_csv(&outcomes, path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        // header + 2 links + 1 error row
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Company,Status,Link"));
        assert!(lines[1].contains("https://acme.com.br"));
        assert!(lines[3].contains("error"));
        assert!(lines[3].contains("boom"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_export_json_summary_counts() {
        let dir = std::env::temp_dir().join("sitefinder_export_json_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.json");
        let path_str = path.to_str().unwrap();

        let outcomes = vec![outcome_with_links(), ResolutionOutcome::error("Beta", "boom")];
        export_json(&outcomes, path_str).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["summary"]["total_companies"], 2);
        assert_eq!(value["summary"]["complete"], 1);
        assert_eq!(value["summary"]["failed"], 1);
        assert_eq!(value["summary"]["total_links"], 2);
        assert_eq!(value["results"][0]["company_name"], "Acme");

        std::fs::remove_dir_all(&dir).ok();
    }
}
