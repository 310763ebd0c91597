//! Browser session management
//!
//! Launches or attaches to a Chrome/Chromium instance and exposes its active tab
//! through the [`PageDriver`](crate::page::PageDriver) interface.

pub mod config;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
