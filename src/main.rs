use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

use sitefinder::batch;
use sitefinder::cli::Cli;
use sitefinder::config::{AppConfig, ConfigError};
use sitefinder::export;
use sitefinder::resolver::Resolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.init {
        let path = AppConfig::create_default_config()?;
        println!("Created default configuration file at: {}", path.display());
        println!("Edit it (or set SITEFINDER_API_KEY / SITEFINDER_SEARCH_ENGINE_ID) before running.");
        return Ok(());
    }

    let mut config = load_config()?;
    config.search.apply_env_overrides();
    if let Some(max_links) = cli.max_links {
        config.search.max_links_per_company = max_links;
    }
    if let Some(delay) = cli.search_delay_ms {
        config.search.search_delay_ms = delay;
    }

    let companies = collect_companies(&cli)?;
    if companies.is_empty() {
        bail!("no company names found in input");
    }

    let resolver = Resolver::new(config.search.clone())?;

    let progress = make_progress_bar(&cli, companies.len() as u64);
    let mut summary = batch::new_batch_summary();

    for (index, name) in companies.iter().enumerate() {
        if index > 0 && config.search.search_delay_ms > 0 {
            sleep(Duration::from_millis(config.search.search_delay_ms)).await;
        }
        if let Some(bar) = &progress {
            bar.set_message(name.clone());
        }

        summary.outcomes.push(resolver.resolve_company(name).await);

        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = &progress {
        bar.finish_with_message("done");
    }
    batch::finalize_batch_summary(&mut summary);

    let output_path = output_path_for(&cli.output, &cli.output_format)?;
    match cli.output_format.as_str() {
        "csv" => export::export_csv(&summary.outcomes, &output_path)?,
        "json" => export::export_json(&summary.outcomes, &output_path)?,
        other => bail!("unsupported output format '{other}' (expected 'csv' or 'json')"),
    }

    export::print_batch_summary(&summary);
    println!("\nResults written to {output_path}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "sitefinder=info",
        1 => "sitefinder=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration, offering to create the default file when it is
/// missing and the session is interactive.
fn load_config() -> Result<AppConfig> {
    match AppConfig::load() {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(path)) => {
            eprintln!("Configuration file not found at {}", path.display());
            match AppConfig::prompt_create_config()? {
                Some(created) => {
                    println!("Created default configuration file at: {}", created.display());
                    AppConfig::load().context("Failed to load the newly created configuration")
                }
                None => bail!(
                    "configuration required: run with --init to create {} and fill in the API credentials",
                    path.display()
                ),
            }
        }
        Err(err) => Err(err.into()),
    }
}

fn collect_companies(cli: &Cli) -> Result<Vec<String>> {
    if let Some(name) = &cli.company {
        return Ok(vec![name.clone()]);
    }
    if let Some(path) = &cli.input_file {
        return batch::parse_company_file(Path::new(path));
    }
    bail!("provide a company with --company or a list with --input-file (see --help)");
}

fn output_path_for(output: &str, format: &str) -> Result<String> {
    let extension = match format {
        "csv" => "csv",
        "json" => "json",
        other => bail!("unsupported output format '{other}' (expected 'csv' or 'json')"),
    };
    if output.to_lowercase().ends_with(&format!(".{extension}")) {
        Ok(output.to_string())
    } else {
        Ok(format!("{output}.{extension}"))
    }
}

fn make_progress_bar(cli: &Cli, total: u64) -> Option<ProgressBar> {
    if cli.no_progress || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("##-"),
    );
    Some(bar)
}
