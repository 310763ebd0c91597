//! Catalog scraper CLI
//!
//! Walks the all-products listing for a locale, probes every product page for the
//! featured-content carousel, screenshots it and writes `<YYYY-MM-DD>-<locale>.csv`.

use anyhow::Context;
use catalog_scraper::{BrowserSession, ConnectionOptions, LaunchOptions, PaginationLimits, ScrapeOptions, report};
use clap::Parser;
use std::{path::PathBuf, time::{Duration, Instant}};

#[derive(Parser)]
#[command(name = "catalog-scraper")]
#[command(version)]
#[command(about = "Probe every catalog product page for the featured-content carousel", long_about = None)]
struct Cli {
    /// Locale path segment of the catalog, e.g. `us` or `de`
    locale: String,

    /// Run the browser without a window (default: headed)
    #[arg(long)]
    headless: bool,

    /// Site host
    #[arg(long, env = "CATALOG_SCRAPER_HOST", default_value = "www.herbalife.com")]
    host: String,

    /// Directory for the CSV report
    #[arg(long, value_name = "DIR", env = "CATALOG_SCRAPER_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Directory for product screenshots
    #[arg(long, value_name = "DIR", env = "CATALOG_SCRAPER_SCREENSHOT_DIR", default_value = ".")]
    screenshot_dir: PathBuf,

    /// Report date as YYYY-MM-DD (default: today)
    #[arg(long, value_name = "DATE")]
    date: Option<String>,

    /// Give up after this many "load more" clicks
    #[arg(long, value_name = "N", default_value = "500")]
    max_load_more: usize,

    /// Give up paginating after this many seconds
    #[arg(long, value_name = "SECS", default_value = "600")]
    pagination_timeout: u64,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", env = "CHROME_PATH")]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// WebSocket endpoint of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Disable the Chrome sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// More output (-v for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            _ => "debug",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let date = match cli.date.as_deref() {
        Some(raw) => report::parse_report_date(raw)?,
        None => chrono::Local::now().date_naive(),
    };

    let options = ScrapeOptions::new()
        .host(cli.host.clone())
        .output_dir(cli.output_dir.clone())
        .screenshot_dir(cli.screenshot_dir.clone())
        .pagination(PaginationLimits {
            max_rounds: cli.max_load_more,
            max_duration: Some(Duration::from_secs(cli.pagination_timeout)),
        });

    eprintln!("Catalog scraper v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Listing: {}", options.site.listing_url(&cli.locale));
    eprintln!("Report: {}", options.output_dir.join(report::report_file_name(date, &cli.locale)).display());

    let started = Instant::now();
    log::info!("start");

    let session = match cli.ws_endpoint {
        Some(ref endpoint) => {
            eprintln!("Browser: attached to {}", endpoint);
            BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))
        }
        None => {
            let mut launch = LaunchOptions::new()
                .headless(cli.headless)
                .window_size(options.viewport.width, options.viewport.height)
                .sandbox(!cli.no_sandbox);
            if let Some(path) = cli.chrome_path {
                launch = launch.chrome_path(path);
            }
            if let Some(dir) = cli.user_data_dir {
                launch = launch.user_data_dir(dir);
            }
            eprintln!("Browser mode: {}", if launch.headless { "headless" } else { "headed" });
            BrowserSession::launch(launch)
        }
    }
    .context("Failed to start browser session")?;

    let summary = catalog_scraper::run(&session, &options, &cli.locale, date)
        .with_context(|| format!("Catalog run for locale '{}' failed", cli.locale))?;

    session.close().context("Failed to close browser")?;

    let with_carousel = summary.records.iter().filter(|r| r.featured_content_visible).count();
    log::info!(
        "{} products, {} with featured content, {} load-more clicks",
        summary.records.len(),
        with_carousel,
        summary.load_more_clicks
    );
    log::info!("start: {:?}", started.elapsed());

    Ok(())
}
