use anyhow::{bail, Context};
use cache_recon::cli::{Cli, OutputFormatter};
use cache_recon::core::{Config, ReportFormat};
use cache_recon::patterns::{load_custom, PatternRegistry};
use cache_recon::recon::{run_recon, ReconOptions};
use cache_recon::report::write_report;
use cache_recon::sources::{self, CacheSource};
use cache_recon::utils::CurlTransport;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Load .env file if it exists
    let _ = dotenv::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Print banner
    OutputFormatter::print_banner();

    if let Err(e) = run(cli).await {
        OutputFormatter::print_error(&format!("Error: {:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    OutputFormatter::print_ethical_warning();

    let config = load_config();
    let transport: Arc<CurlTransport> = Arc::new(CurlTransport::new());

    let options = ReconOptions {
        concurrency: cli.concurrency.unwrap_or(config.fetch.concurrency),
        per_task_timeout: Duration::from_secs(cli.timeout.unwrap_or(config.fetch.timeout_secs)),
        deadline: cli.deadline.map(Duration::from_secs),
        retry_transient: cli.retry || config.fetch.retry_transient,
    };

    let sources = resolve_sources(&cli)?;
    let targets = resolve_targets(&cli, transport.as_ref(), &options).await?;
    let registry = build_registry(cli.regex_file.as_deref())?;

    let format_name = cli
        .output
        .unwrap_or_else(|| config.output.format.clone());
    let format = ReportFormat::parse(&format_name)
        .with_context(|| format!("unknown output format: {}", format_name))?;
    let output_dir = cli
        .output_dir
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    OutputFormatter::print_run_start(targets.len(), &sources);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message(format!(
        "Fetching {} task(s)...",
        targets.len() * sources.len()
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let report = run_recon(transport, &targets, &sources, &registry, &options).await;

    spinner.finish_and_clear();

    OutputFormatter::print_summary(&report);

    let path = write_report(&report, format, &output_dir).context("failed to write report")?;
    OutputFormatter::print_success(&format!("Results saved to {}", path.display()));

    Ok(())
}

fn load_config() -> Config {
    // Try the config candidates in order; fall back to defaults
    let config_paths = ["config/default.toml", "cache_recon.toml", ".cache_recon.toml"];

    for path in config_paths {
        if Path::new(path).exists() {
            match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path);
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse config from {}: {}", path, e);
                    }
                },
                Err(e) => {
                    warn!("Failed to read config from {}: {}", path, e);
                }
            }
        }
    }

    Config::default()
}

fn resolve_sources(cli: &Cli) -> anyhow::Result<Vec<CacheSource>> {
    let mut sources = Vec::new();

    for name in &cli.sources {
        let source = CacheSource::parse(name)
            .with_context(|| format!("unknown cache source: {}", name))?;
        if !sources.contains(&source) {
            sources.push(source);
        }
    }

    if let Some(template) = &cli.custom_template {
        if !template.contains(sources::TEMPLATE_PLACEHOLDER) {
            bail!(
                "custom template must contain the {} placeholder",
                sources::TEMPLATE_PLACEHOLDER
            );
        }
        sources.push(CacheSource::Custom(template.clone()));
    }

    if sources.is_empty() {
        bail!("no cache sources selected");
    }

    Ok(sources)
}

async fn resolve_targets(
    cli: &Cli,
    transport: &CurlTransport,
    options: &ReconOptions,
) -> anyhow::Result<Vec<String>> {
    let mut targets = Vec::new();

    if let Some(url) = &cli.url {
        targets.push(url.clone());
    }

    if let Some(path) = &cli.file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read URL file {}", path.display()))?;
        targets.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }

    if targets.is_empty() {
        bail!("no targets: provide a URL (-u) or a file of URLs (-f)");
    }

    if cli.discover {
        let mut discovered = Vec::new();
        for domain in &targets {
            let urls = sources::wayback::discover_urls(
                transport,
                domain,
                options.per_task_timeout,
                cli.max_urls,
            )
            .await
            .with_context(|| format!("discovery failed for {}", domain))?;
            info!(domain = %domain, count = urls.len(), "discovered archived URLs");
            discovered.extend(urls);
        }
        if discovered.is_empty() {
            bail!("discovery returned no archived URLs");
        }
        targets = discovered;
    }

    // Preserve order, drop duplicates
    let mut seen = HashSet::new();
    targets.retain(|url| seen.insert(url.clone()));

    Ok(targets)
}

fn build_registry(regex_file: Option<&Path>) -> anyhow::Result<PatternRegistry> {
    let mut registry = PatternRegistry::defaults();

    if let Some(path) = regex_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read regex file {}", path.display()))?;
        let lines: Vec<String> = contents.lines().map(String::from).collect();
        let specs = load_custom(&lines)
            .with_context(|| format!("invalid custom pattern in {}", path.display()))?;
        info!(count = specs.len(), "loaded custom patterns");
        for spec in specs {
            registry.insert(spec);
        }
    }

    Ok(registry)
}
