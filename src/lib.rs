//! # catalog-scraper
//!
//! Walks a retail site's "all products" listing in Chrome/Chromium over the DevTools
//! Protocol, checks every product page for a featured-content carousel, screenshots
//! each page and writes a dated CSV report.
//!
//! ## Command line
//!
//! ```bash
//! # Visible browser, report ./<today>-us.csv, screenshots in ./
//! cargo run --bin catalog-scraper -- us
//!
//! # Headless, separate output directories
//! cargo run --bin catalog-scraper -- de --headless --output-dir reports --screenshot-dir shots
//! ```
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use catalog_scraper::{BrowserSession, LaunchOptions, ScrapeOptions};
//!
//! # fn main() -> catalog_scraper::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().headless(true))?;
//! let options = ScrapeOptions::new().output_dir("reports");
//! let today = chrono::Local::now().date_naive();
//!
//! let summary = catalog_scraper::run(&session, &options, "us", today)?;
//! println!("Probed {} products", summary.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! Each stage is also usable on its own through [`catalog`], against any [`PageDriver`].
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and launch configuration
//! - [`page`]: The [`PageDriver`] interface the workflow runs against
//! - [`probe`]: Waiting for elements to become visible
//! - [`catalog`]: Listing and product page stages
//! - [`report`]: CSV report and date formatting
//! - [`config`]: Site, selector and run options
//! - [`error`]: Error types and result aliases

pub mod browser;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod probe;
pub mod report;
pub mod scraper;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use catalog::{ProductPath, ProductTarget, ResultRecord};
pub use config::{PaginationLimits, ScrapeOptions, Selectors, SiteConfig};
pub use error::{Result, ScraperError};
pub use page::{PageDriver, Viewport};
pub use probe::{Visibility, wait_visible};
pub use scraper::{ScrapeSummary, run};
