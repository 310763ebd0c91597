//! Product page probing and the per-product result record.

use crate::{catalog::url::resolve_href,
            config::ScrapeOptions,
            error::{Result, ScraperError},
            page::PageDriver,
            probe::wait_visible};
use serde::Serialize;
use std::{fs,
          path::{Path, PathBuf}};

const CATEGORY_SEGMENT: usize = 3;
const SKU_SEGMENT: usize = 6;

/// The parts of a product URL used to name its screenshot.
///
/// Segments are counted on the raw href split on `/`. For a root-relative href
/// such as `/us/p/sku/123/x/456/y` that gives `sku` and `456`. In an absolute URL
/// the scheme and host take up the leading positions, so `category` holds the
/// locale instead (`https://host/us/p/tea/2/x/20` gives `us` and `2`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPath {
    pub category: String,
    pub sku: String,
    pub variant: Option<String>,
}

impl ProductPath {
    pub fn parse(href: &str) -> Result<Self> {
        let segments: Vec<&str> = href.split('/').collect();

        let segment = |index: usize| -> Result<String> {
            match segments.get(index) {
                Some(s) if !s.is_empty() => Ok((*s).to_string()),
                Some(_) => Err(ScraperError::MalformedProductUrl {
                    url: href.to_string(),
                    reason: format!("path segment {} is empty", index),
                }),
                None => Err(ScraperError::MalformedProductUrl {
                    url: href.to_string(),
                    reason: format!("expected at least {} path segments, found {}", SKU_SEGMENT + 1, segments.len()),
                }),
            }
        };

        let category = segment(CATEGORY_SEGMENT)?;
        let sku = segment(SKU_SEGMENT)?;
        let variant = segments.get(SKU_SEGMENT + 1).filter(|s| !s.is_empty()).map(|s| s.to_string());

        Ok(Self { category, sku, variant })
    }

    /// `<category>_<sku>.jpg`
    pub fn screenshot_name(&self) -> String {
        format!("{}_{}.jpg", self.category, self.sku)
    }
}

/// A product URL ready to visit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductTarget {
    /// The href as it appeared on the listing
    pub href: String,

    /// Where the browser is sent
    pub location: String,

    pub path: ProductPath,
}

impl ProductTarget {
    pub fn new(origin: &str, href: impl Into<String>) -> Result<Self> {
        let href = href.into();
        let path = ProductPath::parse(&href)?;
        let location = resolve_href(origin, &href)?;
        Ok(Self { href, location, path })
    }
}

/// Parse every collected href up front so a malformed one fails before any page is visited
pub fn plan_targets(origin: &str, urls: &[String]) -> Result<Vec<ProductTarget>> {
    urls.iter().map(|url| ProductTarget::new(origin, url.as_str())).collect()
}

/// Outcome of probing one product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub url: String,
    #[serde(rename = "featuredContentVisible")]
    pub featured_content_visible: bool,
    pub scope: Option<String>,
}

impl ResultRecord {
    pub fn absent(url: impl Into<String>) -> Self {
        Self { url: url.into(), featured_content_visible: false, scope: None }
    }
}

/// Visit a product page, probe its featured carousel and screenshot it.
///
/// `position` is the zero-based index of the product among `total`, for progress output.
pub fn probe_product<P>(
    page: &P,
    target: &ProductTarget,
    options: &ScrapeOptions,
    position: usize,
    total: usize,
) -> Result<ResultRecord>
where
    P: PageDriver + ?Sized,
{
    page.set_viewport(options.viewport)?;
    page.navigate(&target.location)?;

    let selectors = &options.selectors;
    let record = if wait_visible(page, &selectors.carousel_active_item, options.carousel_timeout)?.is_present() {
        let scope = page
            .attribute(&selectors.carousel_scope, &selectors.scope_attribute)?
            .filter(|scope| !scope.is_empty());
        ResultRecord { url: target.href.clone(), featured_content_visible: true, scope }
    } else {
        ResultRecord::absent(target.href.clone())
    };

    log::info!(
        "{}/{} {}",
        position,
        total,
        serde_json::to_string(&record).unwrap_or_else(|_| format!("{:?}", record))
    );

    let shot = page.screenshot_full_page(options.jpeg_quality)?;
    let path = save_screenshot(&options.screenshot_dir, &target.path, &shot)?;
    log::debug!("Saved {}", path.display());

    Ok(record)
}

fn save_screenshot(dir: &Path, product: &ProductPath, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(product.screenshot_name());
    fs::write(&path, bytes)?;
    Ok(path)
}
