use crate::{browser::config::{ConnectionOptions, IDLE_BROWSER_TIMEOUT, LaunchOptions},
            error::{Result, ScraperError},
            page::{PageDriver, Viewport}};
use base64::{Engine, prelude::BASE64_STANDARD};
use headless_chrome::{Browser, Tab,
                      protocol::cdp::{Emulation, Page}};
use std::{ffi::OsStr, sync::Arc};

/// Browser session that drives a single tab of a Chrome/Chromium instance.
///
/// The browser process is shut down when the session is dropped, so an error that
/// aborts a run still releases it.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance, held so the process outlives the tab
    _browser: Browser,

    /// The tab every page operation runs against
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        launch_opts.idle_browser_timeout = IDLE_BROWSER_TIMEOUT;

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        log::debug!(
            "Launching browser (headless: {}, window: {}x{})",
            options.headless,
            options.window_width,
            options.window_height
        );

        let browser = Browser::new(launch_opts).map_err(|e| ScraperError::LaunchFailed(e.to_string()))?;
        let tab = browser.new_tab().map_err(|e| ScraperError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { _browser: browser, tab })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, options.idle_timeout)
            .map_err(|e| ScraperError::ConnectionFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| ScraperError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { _browser: browser, tab })
    }

    /// Evaluate a script and return its value, `Null` when the script yields nothing
    fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let result = self.tab.evaluate(script, false).map_err(|e| ScraperError::EvaluationFailed(e.to_string()))?;

        Ok(result.value.unwrap_or(serde_json::Value::Null))
    }

    /// Close the session's tab. The browser process exits when the session is dropped.
    pub fn close(self) -> Result<()> {
        self.tab
            .close(false)
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to close tab: {}", e)))?;

        Ok(())
    }
}

/// Encode a value as a JavaScript literal for embedding in a page script
fn js_literal(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

fn visibility_script(selector: &str) -> String {
    format!(
        r#"
        (function() {{
            const el = document.querySelector({selector});
            if (!el) return false;
            const style = window.getComputedStyle(el);
            if (!style || style.visibility === 'hidden' || style.display === 'none') return false;
            const rect = el.getBoundingClientRect();
            return rect.width > 0 && rect.height > 0;
        }})()
        "#,
        selector = js_literal(selector)
    )
}

fn attribute_script(selector: &str, attribute: &str) -> String {
    format!(
        r#"
        (function() {{
            const el = document.querySelector({selector});
            return el ? el.getAttribute({attribute}) : null;
        }})()
        "#,
        selector = js_literal(selector),
        attribute = js_literal(attribute)
    )
}

fn attribute_values_script(selector: &str, attribute: &str) -> String {
    // Returned as a JSON string; arrays do not come back by value over CDP
    format!(
        r#"
        (function() {{
            const values = Array.from(document.querySelectorAll({selector}))
                .map(el => el.getAttribute({attribute}))
                .filter(value => value !== null);
            return JSON.stringify(values);
        }})()
        "#,
        selector = js_literal(selector),
        attribute = js_literal(attribute)
    )
}

const CONTENT_SIZE_SCRIPT: &str = r#"
    (function() {
        const doc = document.documentElement;
        const body = document.body || doc;
        return JSON.stringify({
            width: Math.max(doc.scrollWidth, body.scrollWidth, doc.clientWidth),
            height: Math.max(doc.scrollHeight, body.scrollHeight, doc.clientHeight)
        });
    })()
"#;

#[derive(Debug, serde::Deserialize)]
struct ContentSize {
    width: f64,
    height: f64,
}

/// Emulate a `viewport` sized page regardless of the window around it
fn device_metrics(viewport: Viewport) -> Emulation::SetDeviceMetricsOverride {
    Emulation::SetDeviceMetricsOverride {
        width: viewport.width,
        height: viewport.height,
        device_scale_factor: 1.0,
        mobile: false,
        scale: None,
        screen_width: None,
        screen_height: None,
        position_x: None,
        position_y: None,
        dont_set_visible_size: None,
        screen_orientation: None,
        viewport: None,
        display_feature: None,
        device_posture: None,
    }
}

/// Capture the whole document, including what lies below the fold
fn full_page_capture(size: &ContentSize, quality: u32) -> Page::CaptureScreenshot {
    Page::CaptureScreenshot {
        format: Some(Page::CaptureScreenshotFormatOption::Jpeg),
        quality: Some(quality),
        clip: Some(Page::Viewport { x: 0.0, y: 0.0, width: size.width, height: size.height, scale: 1.0 }),
        from_surface: Some(true),
        capture_beyond_viewport: Some(true),
        optimize_for_speed: None,
    }
}

impl PageDriver for BrowserSession {
    fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        self.tab
            .call_method(device_metrics(viewport))
            .map_err(|e| ScraperError::TabOperationFailed(format!("Failed to set viewport: {}", e)))?;

        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| ScraperError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| ScraperError::NavigationFailed(format!("Navigation to {} did not complete: {}", url, e)))?;

        Ok(())
    }

    fn is_element_visible(&self, selector: &str) -> Result<bool> {
        let value = self.evaluate(&visibility_script(selector))?;
        Ok(value.as_bool().unwrap_or(false))
    }

    fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .tab
            .find_element(selector)
            .map_err(|e| ScraperError::ElementNotFound(format!("Element '{}' not found: {}", selector, e)))?;

        element
            .click()
            .map_err(|e| ScraperError::InteractionFailed { selector: selector.to_string(), reason: e.to_string() })?;

        Ok(())
    }

    fn attribute(&self, selector: &str, attribute: &str) -> Result<Option<String>> {
        let value = self.evaluate(&attribute_script(selector, attribute))?;
        Ok(value.as_str().map(str::to_string))
    }

    fn attribute_values(&self, selector: &str, attribute: &str) -> Result<Vec<String>> {
        let value = self.evaluate(&attribute_values_script(selector, attribute))?;

        let json_str: String = serde_json::from_value(value)
            .map_err(|e| ScraperError::EvaluationFailed(format!("Expected a JSON string from page: {}", e)))?;

        serde_json::from_str(&json_str)
            .map_err(|e| ScraperError::EvaluationFailed(format!("Failed to parse attribute values: {}", e)))
    }

    fn screenshot_full_page(&self, quality: u32) -> Result<Vec<u8>> {
        let json_str: String = serde_json::from_value(self.evaluate(CONTENT_SIZE_SCRIPT)?)
            .map_err(|e| ScraperError::ScreenshotFailed(format!("Failed to measure page: {}", e)))?;
        let size: ContentSize = serde_json::from_str(&json_str)
            .map_err(|e| ScraperError::ScreenshotFailed(format!("Failed to measure page: {}", e)))?;

        let captured = self
            .tab
            .call_method(full_page_capture(&size, quality))
            .map_err(|e| ScraperError::ScreenshotFailed(e.to_string()))?;

        BASE64_STANDARD
            .decode(captured.data)
            .map_err(|e| ScraperError::ScreenshotFailed(format!("Failed to decode screenshot: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_literal_escapes_quotes() {
        assert_eq!(js_literal("button[data-testid='loadMoreBtn']"), r#""button[data-testid='loadMoreBtn']""#);
        assert_eq!(js_literal(r#"a[title="x"]"#), r#""a[title=\"x\"]""#);
    }

    #[test]
    fn test_scripts_embed_selector() {
        let script = visibility_script(".cmp-content-carousel__item--active");
        assert!(script.contains(r#"document.querySelector(".cmp-content-carousel__item--active")"#));

        let script = attribute_values_script("div > a[href]", "href");
        assert!(script.contains(r#"querySelectorAll("div > a[href]")"#));
        assert!(script.contains(r#"getAttribute("href")"#));
    }

    #[test]
    fn test_device_metrics_sets_exact_viewport() {
        let metrics = device_metrics(Viewport::new(1280, 1024));
        assert_eq!((metrics.width, metrics.height), (1280, 1024));
        assert_eq!(metrics.device_scale_factor, 1.0);
        assert!(!metrics.mobile);
    }

    #[test]
    fn test_full_page_capture_reaches_below_the_fold() {
        let size = ContentSize { width: 1280.0, height: 5000.0 };
        let capture = full_page_capture(&size, 80);

        assert_eq!(capture.capture_beyond_viewport, Some(true));
        assert_eq!(capture.quality, Some(80));
        assert!(matches!(capture.format, Some(Page::CaptureScreenshotFormatOption::Jpeg)));
        let clip = capture.clip.expect("clip set");
        assert_eq!((clip.width, clip.height), (1280.0, 5000.0));
    }

    #[test]
    #[ignore] // Requires Chrome to be installed, run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
    }
}
