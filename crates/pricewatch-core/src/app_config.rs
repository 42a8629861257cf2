use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub products_path: PathBuf,
    pub data_dir: PathBuf,
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: Option<String>,
    pub settle_delay_ms: u64,
    pub element_wait_secs: u64,
    pub search_result_limit: usize,
    pub schedule_cron: String,
}
