//! Wavefront main entry point
//!
//! This is the command-line interface for the Wavefront crawler.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;
use wavefront::config::{
    load_config_with_hash, validate, validate_seed, Config, ConfigOverrides, RobotsFallback,
};
use wavefront::crawler::run_crawl;
use wavefront::output::print_report;

/// Wavefront: a breadth-first, robots.txt-respecting web crawler
///
/// Wavefront starts from a seed URL and visits linked pages level by level,
/// up to a maximum link depth and page count. Links disallowed by the target
/// site's robots.txt are never fetched.
#[derive(Parser, Debug)]
#[command(name = "wavefront")]
#[command(version)]
#[command(about = "A breadth-first, robots.txt-respecting web crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (prompted for if omitted)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum link depth; the seed is depth 1
    #[arg(long, value_name = "N")]
    max_depth: Option<u32>,

    /// Maximum number of pages to visit
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Crawler name used in the User-Agent header and robots.txt matching
    #[arg(long, value_name = "NAME")]
    user_agent: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Policy applied when a site's robots.txt cannot be retrieved
    #[arg(long, value_enum, value_name = "POLICY")]
    robots_fallback: Option<RobotsFallback>,

    /// Do not fetch or honor robots.txt
    #[arg(long)]
    ignore_robots: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.seed.clone(),
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            crawler_name: self.user_agent.clone(),
            request_timeout_secs: self.timeout,
            robots_fallback: self.robots_fallback,
            ignore_robots: self.ignore_robots,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    config.apply_overrides(cli.overrides());
    validate(&config).context("invalid settings")?;

    let seed = resolve_seed(&config)?;

    if cli.dry_run {
        handle_dry_run(&config, &seed);
        return Ok(());
    }

    handle_crawl(&config, seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wavefront=info,warn"),
            1 => EnvFilter::new("wavefront=debug,info"),
            2 => EnvFilter::new("wavefront=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Picks the seed from the command line or config, prompting if neither has one
fn resolve_seed(config: &Config) -> anyhow::Result<Url> {
    let raw = match &config.crawler.seed {
        Some(seed) => seed.clone(),
        None => prompt_for_seed()?,
    };
    Ok(validate_seed(&raw)?)
}

fn prompt_for_seed() -> anyhow::Result<String> {
    print!("Enter the starting URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read seed URL from stdin")?;

    let seed = line.trim();
    if seed.is_empty() {
        anyhow::bail!("no seed URL given");
    }
    Ok(seed.to_string())
}

/// Handles the --dry-run mode: shows the effective settings
fn handle_dry_run(config: &Config, seed: &Url) {
    println!("=== Wavefront Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed: {}", seed);
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nrobots.txt:");
    if config.crawler.respect_robots {
        println!("  Respected (fallback when unavailable: {:?})", config.crawler.robots_fallback);
    } else {
        println!("  Ignored");
    }

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());
    println!("  robots.txt token: {}", config.user_agent.robots_token());

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: Url) -> anyhow::Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    let signal_stop = Arc::clone(&stop);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current page");
            signal_stop.store(true, Ordering::Relaxed);
        }
    });

    match run_crawl(config, seed, Some(stop)).await {
        Ok(report) => {
            tracing::info!("Crawl completed successfully");
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
