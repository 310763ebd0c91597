use crate::error::{Result, ScraperError};

/// Resolve a product tile href into something the browser can navigate to.
///
/// Absolute URLs pass through; root-relative paths are joined to `origin`.
/// Anything else (`./x`, `x/y`) has no stable base and is rejected.
pub fn resolve_href(origin: &str, href: &str) -> Result<String> {
    let trimmed = href.trim();

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("file://")
        || trimmed.starts_with("data:")
    {
        return Ok(trimmed.to_string());
    }

    // Protocol-relative
    if let Some(rest) = trimmed.strip_prefix("//") {
        let scheme = origin.split("://").next().unwrap_or("https");
        return Ok(format!("{}://{}", scheme, rest));
    }

    if trimmed.starts_with('/') {
        return Ok(format!("{}{}", origin.trim_end_matches('/'), trimmed));
    }

    Err(ScraperError::MalformedProductUrl {
        url: href.to_string(),
        reason: "not an absolute or root-relative URL".to_string(),
    })
}
