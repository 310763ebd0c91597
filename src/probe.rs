//! Waiting for elements to become visible.
//!
//! Every presence check in the workflow goes through [`wait_visible`], so a missing
//! element is an ordinary [`Visibility::Absent`] outcome while a broken page or
//! connection still surfaces as an error.

use crate::{error::Result, page::PageDriver};
use std::{thread,
          time::{Duration, Instant}};

/// Delay between visibility checks
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of waiting for an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// The element was seen
    Present,
    /// The element did not show up before the timeout
    Absent { after: Duration },
}

impl Visibility {
    pub fn is_present(&self) -> bool {
        matches!(self, Visibility::Present)
    }
}

/// Poll until an element matching `selector` is visible or `timeout` elapses.
///
/// The page is checked at least once, even for a zero timeout.
pub fn wait_visible<P>(page: &P, selector: &str, timeout: Duration) -> Result<Visibility>
where
    P: PageDriver + ?Sized,
{
    let started = Instant::now();

    loop {
        if page.is_element_visible(selector)? {
            log::debug!("'{}' visible after {:?}", selector, started.elapsed());
            return Ok(Visibility::Present);
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            log::debug!("'{}' absent after {:?}", selector, elapsed);
            return Ok(Visibility::Absent { after: elapsed });
        }

        thread::sleep(POLL_INTERVAL.min(timeout - elapsed));
    }
}
