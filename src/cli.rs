use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sitefinder")]
#[command(about = "Locates probable official websites for company names via search queries")]
#[command(version)]
pub struct Cli {
    /// Create default configuration file at ./config/sitefinder.toml
    #[arg(long)]
    pub init: bool,

    /// Single company name to resolve (alternative to --input-file)
    #[arg(short, long)]
    pub company: Option<String>,

    /// Path to CSV or JSON file with company names
    /// CSV: one name per line, or a column named "empresa"/"company"
    /// JSON: array of strings, or objects with an "empresa" field
    #[arg(short, long, value_name = "FILE")]
    pub input_file: Option<String>,

    /// Output format: 'csv' (default) or 'json'
    #[arg(short = 'f', long, default_value = "csv")]
    pub output_format: String,

    /// Output file path (extension appended from format if missing)
    #[arg(short, long, default_value = "company_sites")]
    pub output: String,

    /// Maximum links kept per company (overrides config)
    #[arg(long, value_name = "N")]
    pub max_links: Option<usize>,

    /// Delay between companies in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    pub search_delay_ms: Option<u64>,

    /// Verbose logging (use -v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["sitefinder"]);
        assert!(!cli.init);
        assert!(cli.company.is_none());
        assert_eq!(cli.output_format, "csv");
        assert_eq!(cli.output, "company_sites");
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_company_and_overrides() {
        let cli = Cli::parse_from([
            "sitefinder",
            "--company",
            "Acme Ltda",
            "--max-links",
            "2",
            "-f",
            "json",
            "-vv",
        ]);
        assert_eq!(cli.company.as_deref(), Some("Acme Ltda"));
        assert_eq!(cli.max_links, Some(2));
        assert_eq!(cli.output_format, "json");
        assert_eq!(cli.verbose, 2);
    }
}
