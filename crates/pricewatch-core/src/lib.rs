pub mod app_config;
pub mod config;
pub mod platform;
pub mod products;
pub mod urls;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use platform::Platform;
pub use products::{
    ProductRecord, ScrapedProduct, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND,
};
pub use urls::{load_product_urls, load_product_urls_or_empty, PlatformUrls, ProductUrls};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read products file {path}: {source}")]
    ProductsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse products file {path}: {source}")]
    ProductsFileParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
