use colored::Colorize;

use crate::core::results::Report;
use crate::sources::CacheSource;

pub struct OutputFormatter;

impl OutputFormatter {
    /// Print the startup banner
    pub fn print_banner() {
        println!("{}", "=".repeat(70).bright_cyan());
        println!(
            "{}",
            "  Web Cache Recon - Cached Page Exposure Scanner"
                .bright_cyan()
                .bold()
        );
        println!("{}", "=".repeat(70).bright_cyan());
        println!();
    }

    /// Print an ethical use warning
    pub fn print_ethical_warning() {
        println!("{}", "⚠️  AUTHORIZED USE ONLY ⚠️".yellow().bold());
        println!("This tool queries public caches of third-party pages.");
        println!("By using this tool, you agree to:");
        println!("  {} Only assess domains you are authorized to test", "✓".green());
        println!("  {} Report exposed data to its owners", "✓".green());
        println!("  {} Not use findings for unauthorized purposes", "✓".green());
        println!();
    }

    /// Print the run header
    pub fn print_run_start(targets: usize, sources: &[CacheSource]) {
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        println!(
            "{} Scanning {} target(s) across {} source(s): {}",
            "🔍".bright_yellow(),
            targets.to_string().bright_white(),
            sources.len().to_string().bright_white(),
            names.join(", ").bright_cyan()
        );
        println!();
    }

    /// Print final statistics
    pub fn print_summary(report: &Report) {
        let summary = report.summary();

        println!();
        println!("{}", "=".repeat(70).bright_cyan());
        println!("{}", "  Results Summary".bright_cyan().bold());
        println!("{}", "=".repeat(70).bright_cyan());
        println!();

        println!("  Tasks dispatched: {}", summary.total_tasks.to_string().bright_white());
        println!("  Succeeded: {}", summary.succeeded.to_string().bright_green());
        println!("  Failed: {}", summary.failed.to_string().bright_red());
        println!();

        if !summary.total_matches_by_pattern.is_empty() {
            println!("  {} Matches by pattern:", "📊".bright_yellow());
            for count in &summary.total_matches_by_pattern {
                println!(
                    "    {}: {}",
                    count.pattern.bright_cyan(),
                    count.matches.to_string().bright_white()
                );
            }
            println!();
        }

        if !report.failures.is_empty() {
            println!("  {} Failures:", "⚠️".bright_yellow());
            for failure in &report.failures {
                println!(
                    "    {} ({}): {}",
                    failure.task.target_url.bright_white(),
                    failure.task.source.name().bright_cyan(),
                    failure.error.to_string().bright_red()
                );
            }
            println!();
        }

        println!("{}", "=".repeat(70).bright_cyan());
    }

    /// Print error message
    pub fn print_error(message: &str) {
        eprintln!("{} {}", "❌".bright_red(), message.red());
    }

    /// Print warning message
    pub fn print_warning(message: &str) {
        println!("{} {}", "⚠️".bright_yellow(), message.yellow());
    }

    /// Print success message
    pub fn print_success(message: &str) {
        println!("{} {}", "✓".bright_green(), message.green());
    }

    /// Print info message
    pub fn print_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }
}
