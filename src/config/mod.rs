use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the curation backend, without a trailing slash.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Cadence of status checks after triggering a content scrape.
    #[serde(default = "default_scrape_poll_interval_ms")]
    pub scrape_poll_interval_ms: u64,

    /// How long to keep checking before giving up on a scrape job.
    #[serde(default = "default_scrape_poll_timeout_ms")]
    pub scrape_poll_timeout_ms: u64,

    /// Cadence of status checks after triggering summary generation.
    #[serde(default = "default_summary_poll_interval_ms")]
    pub summary_poll_interval_ms: u64,

    /// How long to keep checking before giving up on a summary job.
    #[serde(default = "default_summary_poll_timeout_ms")]
    pub summary_poll_timeout_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_scrape_poll_interval_ms() -> u64 {
    2_000
}

fn default_scrape_poll_timeout_ms() -> u64 {
    30_000
}

fn default_summary_poll_interval_ms() -> u64 {
    3_000
}

fn default_summary_poll_timeout_ms() -> u64 {
    60_000
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            scrape_poll_interval_ms: default_scrape_poll_interval_ms(),
            scrape_poll_timeout_ms: default_scrape_poll_timeout_ms(),
            summary_poll_interval_ms: default_summary_poll_interval_ms(),
            summary_poll_timeout_ms: default_summary_poll_timeout_ms(),
        }
    }
}
