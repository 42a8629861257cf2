//! The browser seam.
//!
//! Scraping logic only ever talks to a [`PageSession`]; the WebDriver-backed
//! implementation lives in [`webdriver`]. Sessions are used strictly in
//! sequence (navigate, settle, read) by a single owner, so every method takes
//! `&mut self` and [`PageSession::release`] consumes the session.

mod webdriver;

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

pub use webdriver::{BrowserOptions, WebDriverSession};

pub trait PageSession: Send {
    /// Navigates to `url` and returns once the browser reports the load as done.
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), ScraperError>> + Send;

    /// Serialized DOM of the current page, including script-rendered content.
    fn page_source(&mut self) -> impl Future<Output = Result<String, ScraperError>> + Send;

    /// URL the browser is showing now, after any redirects.
    fn current_url(&mut self) -> impl Future<Output = Result<String, ScraperError>> + Send;

    /// Polls until an element matching `css` is present or `timeout` elapses.
    ///
    /// Returns `false` on timeout; callers carry on and let field extraction
    /// fall back to sentinels.
    fn wait_for(&mut self, css: &str, timeout: Duration) -> impl Future<Output = bool> + Send;

    /// Outer HTML of up to `limit` elements matching `css`, in document order.
    ///
    /// Each element is read independently: an element that went stale between
    /// lookup and read yields an `Err` entry without affecting its neighbours.
    /// The outer `Err` is reserved for the lookup itself failing.
    fn item_fragments(
        &mut self,
        css: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Result<String, ScraperError>>, ScraperError>> + Send;

    /// Ends the browser session.
    fn release(self) -> impl Future<Output = Result<(), ScraperError>> + Send
    where
        Self: Sized;
}
