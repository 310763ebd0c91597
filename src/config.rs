//! Run configuration: target site, selectors, timeouts and output locations.

use crate::page::Viewport;
use std::{path::PathBuf, time::Duration};

/// CSS selectors the workflow depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    /// Cookie-consent accept button
    pub consent_button: String,

    /// "Load more" button under the product grid
    pub load_more: String,

    /// Product tile anchors on the listing page
    pub product_link: String,

    /// Active slide of the featured-content carousel
    pub carousel_active_item: String,

    /// Carousel container carrying the scope attribute
    pub carousel_scope: String,

    /// Attribute read from the carousel container
    pub scope_attribute: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            consent_button: "#onetrust-accept-btn-handler".to_string(),
            load_more: "button[data-testid='loadMoreBtn']".to_string(),
            product_link: "div[class*='ProductTile'] > a[href]".to_string(),
            carousel_active_item: ".cmp-content-carousel__item--active".to_string(),
            carousel_scope: ".cmp-content-carousel".to_string(),
            scope_attribute: "data-scope".to_string(),
        }
    }
}

/// The site whose catalog is walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Host name, without scheme
    pub host: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { host: "www.herbalife.com".to_string() }
    }
}

impl SiteConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    /// `https://<host>`
    pub fn origin(&self) -> String {
        format!("https://{}", self.host)
    }

    /// Listing page that holds every product for `locale`
    pub fn listing_url(&self, locale: &str) -> String {
        format!("{}/{}/u/category/all-products", self.origin(), locale)
    }
}

/// Bounds on the "load more" loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    /// Maximum number of clicks on the control
    pub max_rounds: usize,

    /// Maximum time spent paginating; unbounded when `None`
    pub max_duration: Option<Duration>,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self { max_rounds: 500, max_duration: Some(Duration::from_secs(10 * 60)) }
    }
}

/// Everything a catalog run needs besides the page and the locale
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub site: SiteConfig,
    pub selectors: Selectors,
    pub pagination: PaginationLimits,

    /// Viewport applied before the listing and before every product
    pub viewport: Viewport,

    /// Wait for consent and "load more" controls
    pub probe_timeout: Duration,

    /// Wait for the featured carousel on a product page
    pub carousel_timeout: Duration,

    /// Directory the CSV report is written to
    pub output_dir: PathBuf,

    /// Directory screenshots are written to
    pub screenshot_dir: PathBuf,

    /// JPEG quality, 0-100
    pub jpeg_quality: u32,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            selectors: Selectors::default(),
            pagination: PaginationLimits::default(),
            viewport: Viewport::default(),
            probe_timeout: Duration::from_millis(2000),
            carousel_timeout: Duration::from_millis(3000),
            output_dir: PathBuf::from("."),
            screenshot_dir: PathBuf::from("."),
            jpeg_quality: 80,
        }
    }
}

impl ScrapeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the site host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.site = SiteConfig::new(host);
        self
    }

    /// Builder method: replace the selector set
    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.selectors = selectors;
        self
    }

    /// Builder method: set pagination bounds
    pub fn pagination(mut self, limits: PaginationLimits) -> Self {
        self.pagination = limits;
        self
    }

    /// Builder method: set both probe timeouts
    pub fn timeouts(mut self, probe: Duration, carousel: Duration) -> Self {
        self.probe_timeout = probe;
        self.carousel_timeout = carousel;
        self
    }

    /// Builder method: set the report directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder method: set the screenshot directory
    pub fn screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Builder method: set JPEG quality, clamped to 100
    pub fn jpeg_quality(mut self, quality: u32) -> Self {
        self.jpeg_quality = quality.min(100);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url() {
        let site = SiteConfig::default();
        assert_eq!(site.listing_url("us"), "https://www.herbalife.com/us/u/category/all-products");
        assert_eq!(SiteConfig::new("shop.test").listing_url("de"), "https://shop.test/de/u/category/all-products");
    }

    #[test]
    fn test_default_timeouts() {
        let opts = ScrapeOptions::default();
        assert_eq!(opts.probe_timeout, Duration::from_millis(2000));
        assert_eq!(opts.carousel_timeout, Duration::from_millis(3000));
        assert_eq!(opts.viewport, Viewport::new(1280, 1024));
    }

    #[test]
    fn test_builder() {
        let opts = ScrapeOptions::new()
            .host("example.test")
            .output_dir("/tmp/reports")
            .jpeg_quality(250)
            .pagination(PaginationLimits { max_rounds: 3, max_duration: None });

        assert_eq!(opts.site.origin(), "https://example.test");
        assert_eq!(opts.output_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(opts.jpeg_quality, 100);
        assert_eq!(opts.pagination.max_rounds, 3);
    }
}
