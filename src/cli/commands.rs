use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cache-recon")]
#[command(version, about = "Scan cached copies of web pages for exposed secrets", long_about = None)]
pub struct Cli {
    /// Target URL to analyze (e.g., https://example.com)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Path to a file containing URLs to analyze, one per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Treat targets as domains and expand them into archived URLs via the
    /// Wayback CDX index
    #[arg(long)]
    pub discover: bool,

    /// Maximum URLs to take per domain when discovering (0 = unlimited)
    #[arg(long, default_value = "50")]
    pub max_urls: usize,

    /// Cache sources to query (wayback, google)
    #[arg(short, long, default_value = "wayback", value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Additional custom source: a URL template containing {url}
    #[arg(long)]
    pub custom_template: Option<String>,

    /// Path to a file of custom regex patterns, one per line
    #[arg(short = 'r', long)]
    pub regex_file: Option<PathBuf>,

    /// Output format (json, csv, markdown)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory to save the results
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent fetches
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Abort the whole run after this many seconds; unresolved fetches are
    /// reported as cancelled
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Retry timed-out or unreachable fetches once
    #[arg(long)]
    pub retry: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
