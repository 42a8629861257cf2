use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to start browser session at {webdriver_url}: {reason}")]
    SessionStart {
        webdriver_url: String,
        reason: String,
    },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("browser command `{command}` failed: {reason}")]
    Command {
        command: &'static str,
        reason: String,
    },

    #[error("element matching \"{selector}\" could not be read: {reason}")]
    StaleElement { selector: String, reason: String },

    #[error("failed to release browser session: {0}")]
    Release(String),
}
