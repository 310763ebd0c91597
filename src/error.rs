use std::time::Duration;
use thiserror::Error;

/// Errors that can end a catalog run
#[derive(Debug, Error)]
pub enum ScraperError {
    /// Browser failed to launch
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to attach to a running browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// Tab could not be created, resized or queried
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation did not complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// A page script could not be evaluated
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Element could not be found for an interaction
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Element was found but the interaction failed
    #[error("Interaction with '{selector}' failed: {reason}")]
    InteractionFailed { selector: String, reason: String },

    /// Screenshot capture failed
    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    /// The "load more" control never went away
    #[error("Pagination did not converge after {rounds} rounds ({elapsed:?})")]
    PaginationDidNotConverge { rounds: usize, elapsed: Duration },

    /// A product href does not have the expected path shape
    #[error("Malformed product URL '{url}': {reason}")]
    MalformedProductUrl { url: String, reason: String },

    /// Caller supplied a value outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// CSV serialization failure
    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, ScraperError>;
