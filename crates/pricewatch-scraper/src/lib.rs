pub mod batch;
pub mod classify;
pub mod error;
pub mod extract;
pub mod normalize;
pub mod session;
pub mod site;
pub mod sites;

pub use batch::{BatchRunner, BatchSummary};
pub use classify::{classify, PageKind};
pub use error::ScraperError;
pub use normalize::{
    normalize_record, parse_discount, parse_price, parse_rating, parse_reviews, RecordMetrics,
};
pub use session::{BrowserOptions, PageSession, WebDriverSession};
pub use site::{PageScrape, ScrapeOptions, SiteScraper};
