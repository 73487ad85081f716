use serde::{Deserialize, Serialize};

/// Response from `POST /api/content/scrape/{id}`.
///
/// The trigger returns as soon as the job is accepted; progress is observed
/// through the status endpoint, not through this response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub content_length: Option<i64>,
}

/// Response from `POST /api/content/summarize/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub summary_length: Option<i64>,
}

/// Truncated content view from `GET /api/content/preview/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPreview {
    pub news_id: i64,
    pub title: String,
    pub language: String,
    pub preview: String,
    pub full_length: i64,
    pub is_truncated: bool,
}

/// Backend-wide scraping statistics from `GET /api/content/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingStats {
    pub total_articles: i64,
    pub scraped_articles: i64,
    pub translated_articles: i64,
    pub scraping_percentage: f64,
    pub translation_percentage: f64,
    #[serde(default)]
    pub domain_breakdown: Vec<DomainStats>,
}

/// Per-domain slice of [`ScrapingStats`]. Articles collected before domain
/// tracking report a null domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainStats {
    #[serde(default)]
    pub domain: Option<String>,
    pub total_articles: i64,
    pub scraped_articles: i64,
    pub translated_articles: i64,
    pub scraping_percentage: f64,
}
