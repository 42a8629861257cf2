//! [`PageSession`] backed by a W3C WebDriver server (chromedriver or a
//! Selenium grid) via `thirtyfour`.

use std::time::Duration;

use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;

use super::PageSession;
use crate::error::ScraperError;

/// Interval between presence checks while waiting for an element.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// How to reach and launch the browser.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// WebDriver endpoint, e.g. `http://localhost:9515` for a local chromedriver.
    pub webdriver_url: String,
    pub headless: bool,
    /// Overrides Chrome's default user agent when set.
    pub user_agent: Option<String>,
}

impl BrowserOptions {
    #[must_use]
    pub fn from_app_config(config: &pricewatch_core::AppConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Chrome command-line switches for this configuration.
    fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(5);
        if self.headless {
            args.push("--headless=new".to_string());
        }
        args.push("--no-sandbox".to_string());
        args.push("--disable-dev-shm-usage".to_string());
        args.push("--disable-blink-features=AutomationControlled".to_string());
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={ua}"));
        }
        args
    }
}

/// A live Chrome session driven over WebDriver.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Starts a new Chrome session on the configured WebDriver server.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SessionStart`] if the capabilities are rejected
    /// or the WebDriver server is unreachable. No scraping is possible without
    /// a session, so callers should treat this as fatal.
    pub async fn connect(options: &BrowserOptions) -> Result<Self, ScraperError> {
        let start_error = |reason: String| ScraperError::SessionStart {
            webdriver_url: options.webdriver_url.clone(),
            reason,
        };

        let mut caps = DesiredCapabilities::chrome();
        for arg in options.chrome_args() {
            caps.add_arg(&arg).map_err(|e| start_error(e.to_string()))?;
        }
        caps.add_exclude_switch("enable-automation")
            .map_err(|e| start_error(e.to_string()))?;
        caps.add_experimental_option("useAutomationExtension", false)
            .map_err(|e| start_error(e.to_string()))?;

        let driver = WebDriver::new(options.webdriver_url.as_str(), caps)
            .await
            .map_err(|e| start_error(e.to_string()))?;

        tracing::info!(
            webdriver_url = %options.webdriver_url,
            headless = options.headless,
            "browser session started"
        );
        Ok(Self { driver })
    }
}

impl PageSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), ScraperError> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn page_source(&mut self) -> Result<String, ScraperError> {
        self.driver
            .source()
            .await
            .map_err(|e| ScraperError::Command {
                command: "page_source",
                reason: e.to_string(),
            })
    }

    async fn current_url(&mut self) -> Result<String, ScraperError> {
        self.driver
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(|e| ScraperError::Command {
                command: "current_url",
                reason: e.to_string(),
            })
    }

    async fn wait_for(&mut self, css: &str, timeout: Duration) -> bool {
        match self
            .driver
            .query(By::Css(css))
            .wait(timeout, WAIT_POLL_INTERVAL)
            .first()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(
                    selector = css,
                    error = %e,
                    "element did not appear before timeout"
                );
                false
            }
        }
    }

    async fn item_fragments(
        &mut self,
        css: &str,
        limit: usize,
    ) -> Result<Vec<Result<String, ScraperError>>, ScraperError> {
        let elements = self
            .driver
            .find_all(By::Css(css))
            .await
            .map_err(|e| ScraperError::Command {
                command: "find_all",
                reason: e.to_string(),
            })?;

        let mut fragments = Vec::with_capacity(elements.len().min(limit));
        for element in elements.into_iter().take(limit) {
            let fragment = element
                .outer_html()
                .await
                .map_err(|e| ScraperError::StaleElement {
                    selector: css.to_string(),
                    reason: e.to_string(),
                });
            fragments.push(fragment);
        }
        Ok(fragments)
    }

    async fn release(self) -> Result<(), ScraperError> {
        self.driver
            .quit()
            .await
            .map_err(|e| ScraperError::Release(e.to_string()))
    }
}
