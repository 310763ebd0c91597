//! Runs the full catalog workflow against a page.

use crate::{catalog::{self, ResultRecord},
            config::ScrapeOptions,
            error::Result,
            page::PageDriver,
            report};
use chrono::NaiveDate;
use std::{fs,
          path::PathBuf,
          time::{Duration, Instant}};

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    /// One record per collected product URL, in listing order
    pub records: Vec<ResultRecord>,

    /// Number of "load more" clicks issued
    pub load_more_clicks: usize,

    /// Whether a consent overlay was dismissed
    pub consent_dismissed: bool,

    /// Report location, `None` when writing it failed
    pub report_path: Option<PathBuf>,

    pub elapsed: Duration,
}

/// Walk the listing for `locale`, probe every product and write the report dated `date`.
///
/// Errors from the listing or product stages abort the run. A failure to write the
/// report is logged and reflected in [`ScrapeSummary::report_path`].
pub fn run<P>(page: &P, options: &ScrapeOptions, locale: &str, date: NaiveDate) -> Result<ScrapeSummary>
where
    P: PageDriver + ?Sized,
{
    let started = Instant::now();
    let selectors = &options.selectors;

    page.set_viewport(options.viewport)?;

    let listing = options.site.listing_url(locale);
    log::info!("Opening {}", listing);
    page.navigate(&listing)?;

    let consent_dismissed = catalog::dismiss_consent(page, &selectors.consent_button, options.probe_timeout)?;
    let load_more_clicks =
        catalog::load_all_products(page, &selectors.load_more, options.probe_timeout, options.pagination)?;

    let urls = catalog::collect_product_urls(page, &selectors.product_link)?;
    let targets = catalog::plan_targets(&options.site.origin(), &urls)?;

    fs::create_dir_all(&options.screenshot_dir)?;

    let total = targets.len();
    let mut records = Vec::with_capacity(total);
    for (position, target) in targets.iter().enumerate() {
        records.push(catalog::probe_product(page, target, options, position, total)?);
    }

    let report_path = match report::write_report(&options.output_dir, date, locale, &records) {
        Ok(path) => {
            log::info!("done writing {}", path.display());
            Some(path)
        }
        Err(e) => {
            log::error!("Failed to write report: {}", e);
            None
        }
    };

    Ok(ScrapeSummary { records, load_more_clicks, consent_dismissed, report_path, elapsed: started.elapsed() })
}
