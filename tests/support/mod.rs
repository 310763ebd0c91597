//! Scripted in-memory site for driving the workflow without a browser.

#![allow(dead_code)]

use catalog_scraper::{PageDriver, Result, ScraperError, Selectors, Viewport};
use std::{cell::{Cell, RefCell},
          collections::HashMap};

#[derive(Debug, Clone, Default)]
pub struct FakeProduct {
    pub carousel_visible: bool,
    pub scope: Option<String>,
}

impl FakeProduct {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn with_carousel(scope: Option<&str>) -> Self {
        Self { carousel_visible: true, scope: scope.map(str::to_string) }
    }
}

/// A listing plus product pages, keyed by navigable URL
pub struct FakeSite {
    selectors: Selectors,
    listing_url: String,
    hrefs: Vec<String>,
    products: HashMap<String, FakeProduct>,

    consent_visible: Cell<bool>,
    load_more_left: Cell<usize>,
    current: RefCell<String>,

    pub navigations: RefCell<Vec<String>>,
    pub viewports: RefCell<Vec<Viewport>>,
}

impl FakeSite {
    pub fn new(listing_url: impl Into<String>) -> Self {
        Self {
            selectors: Selectors::default(),
            listing_url: listing_url.into(),
            hrefs: Vec::new(),
            products: HashMap::new(),
            consent_visible: Cell::new(false),
            load_more_left: Cell::new(0),
            current: RefCell::new(String::new()),
            navigations: RefCell::new(Vec::new()),
            viewports: RefCell::new(Vec::new()),
        }
    }

    pub fn with_consent(self) -> Self {
        self.consent_visible.set(true);
        self
    }

    /// The control stays visible for `clicks` clicks; `usize::MAX` never goes away
    pub fn with_load_more(self, clicks: usize) -> Self {
        self.load_more_left.set(clicks);
        self
    }

    pub fn with_link(mut self, href: &str) -> Self {
        self.hrefs.push(href.to_string());
        self
    }

    pub fn with_product(mut self, location: &str, product: FakeProduct) -> Self {
        self.products.insert(location.to_string(), product);
        self
    }

    fn on_listing(&self) -> bool {
        *self.current.borrow() == self.listing_url
    }

    fn product(&self) -> Option<FakeProduct> {
        self.products.get(self.current.borrow().as_str()).cloned()
    }
}

impl PageDriver for FakeSite {
    fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        self.viewports.borrow_mut().push(viewport);
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        if url != self.listing_url && !self.products.contains_key(url) {
            return Err(ScraperError::NavigationFailed(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        }
        self.navigations.borrow_mut().push(url.to_string());
        *self.current.borrow_mut() = url.to_string();
        Ok(())
    }

    fn is_element_visible(&self, selector: &str) -> Result<bool> {
        let s = &self.selectors;
        if self.on_listing() {
            if selector == s.consent_button {
                return Ok(self.consent_visible.get());
            }
            if selector == s.load_more {
                return Ok(self.load_more_left.get() > 0);
            }
            return Ok(false);
        }
        if selector == s.carousel_active_item {
            return Ok(self.product().is_some_and(|p| p.carousel_visible));
        }
        Ok(false)
    }

    fn click(&self, selector: &str) -> Result<()> {
        if selector == self.selectors.consent_button {
            self.consent_visible.set(false);
        } else if selector == self.selectors.load_more {
            let left = self.load_more_left.get();
            if left != usize::MAX {
                self.load_more_left.set(left.saturating_sub(1));
            }
        }
        Ok(())
    }

    fn attribute(&self, selector: &str, attribute: &str) -> Result<Option<String>> {
        if selector == self.selectors.carousel_scope && attribute == self.selectors.scope_attribute {
            return Ok(self.product().and_then(|p| p.scope));
        }
        Ok(None)
    }

    fn attribute_values(&self, selector: &str, attribute: &str) -> Result<Vec<String>> {
        if self.on_listing() && selector == self.selectors.product_link && attribute == "href" {
            return Ok(self.hrefs.clone());
        }
        Ok(Vec::new())
    }

    fn screenshot_full_page(&self, _quality: u32) -> Result<Vec<u8>> {
        Ok(format!("jpeg:{}", self.current.borrow()).into_bytes())
    }
}
