//! The page operations the catalog workflow needs from a browser.
//!
//! [`BrowserSession`](crate::BrowserSession) implements this over the DevTools protocol.
//! Every workflow stage is generic over `PageDriver`, so it can also run against a
//! scripted page in tests.

use crate::error::Result;

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 1024)
    }
}

/// A single page context that can be navigated, queried and captured
pub trait PageDriver {
    /// Resize the page's viewport
    fn set_viewport(&self, viewport: Viewport) -> Result<()>;

    /// Navigate to `url` and wait until the load completes
    fn navigate(&self, url: &str) -> Result<()>;

    /// Whether an element matching `selector` is currently rendered and visible.
    ///
    /// Absence is `Ok(false)`; `Err` is reserved for faults in the automation itself.
    fn is_element_visible(&self, selector: &str) -> Result<bool>;

    /// Click the first element matching `selector`
    fn click(&self, selector: &str) -> Result<()>;

    /// Read `attribute` from the first element matching `selector`.
    ///
    /// `None` when either the element or the attribute is missing.
    fn attribute(&self, selector: &str, attribute: &str) -> Result<Option<String>>;

    /// Read `attribute` from every element matching `selector`, in document order
    fn attribute_values(&self, selector: &str, attribute: &str) -> Result<Vec<String>>;

    /// Capture the whole scrollable page as a JPEG
    fn screenshot_full_page(&self, quality: u32) -> Result<Vec<u8>>;
}
