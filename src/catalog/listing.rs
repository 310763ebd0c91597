//! Listing page stages: consent, "load more" pagination and link collection.

use crate::{config::PaginationLimits,
            error::{Result, ScraperError},
            page::PageDriver,
            probe::{Visibility, wait_visible}};
use std::time::{Duration, Instant};

/// State of the "load more" loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    MoreAvailable,
    Exhausted,
}

impl From<Visibility> for PaginationState {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Present => PaginationState::MoreAvailable,
            Visibility::Absent { .. } => PaginationState::Exhausted,
        }
    }
}

/// Click the cookie-consent button if it shows up.
///
/// Returns whether a click was issued successfully. The overlay is not re-checked.
pub fn dismiss_consent<P>(page: &P, selector: &str, timeout: Duration) -> Result<bool>
where
    P: PageDriver + ?Sized,
{
    if !wait_visible(page, selector, timeout)?.is_present() {
        log::debug!("No consent overlay");
        return Ok(false);
    }

    match page.click(selector) {
        Ok(()) => {
            log::info!("Dismissed consent overlay");
            Ok(true)
        }
        Err(e) => {
            log::warn!("Consent overlay visible but click failed: {}", e);
            Ok(false)
        }
    }
}

/// Click "load more" until it disappears. Returns the number of clicks issued.
///
/// Failed clicks are ignored and the control is probed again. Exceeding either bound
/// in `limits` yields [`ScraperError::PaginationDidNotConverge`].
pub fn load_all_products<P>(page: &P, selector: &str, probe_timeout: Duration, limits: PaginationLimits) -> Result<usize>
where
    P: PageDriver + ?Sized,
{
    let started = Instant::now();
    let mut rounds = 0;
    let mut state = PaginationState::from(wait_visible(page, selector, probe_timeout)?);

    while state == PaginationState::MoreAvailable {
        let elapsed = started.elapsed();
        let out_of_time = limits.max_duration.is_some_and(|max| elapsed >= max);
        if rounds >= limits.max_rounds || out_of_time {
            return Err(ScraperError::PaginationDidNotConverge { rounds, elapsed });
        }

        if let Err(e) = page.click(selector) {
            log::debug!("Load more click ignored: {}", e);
        }
        rounds += 1;

        state = wait_visible(page, selector, probe_timeout)?.into();
    }

    log::info!("Listing fully loaded after {} load-more clicks ({:?})", rounds, started.elapsed());
    Ok(rounds)
}

/// Collect every product tile href, in document order, duplicates included
pub fn collect_product_urls<P>(page: &P, selector: &str) -> Result<Vec<String>>
where
    P: PageDriver + ?Sized,
{
    let urls = page.attribute_values(selector, "href")?;
    log::info!("Found {} product links", urls.len());
    Ok(urls)
}
