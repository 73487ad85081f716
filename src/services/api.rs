//! REST client for the news-curation backend.
//!
//! Wraps the backend's content, comment and category endpoints using
//! [`reqwest`]. Non-2xx responses are decoded into [`ApiError::Server`] with
//! the `detail` message the backend puts in its JSON error bodies.

use std::future::Future;
use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;
use crate::models::article::{Article, Language};
use crate::models::category::{Category, NewCategory, SaveSummaryRequest, SaveSummaryResponse};
use crate::models::comment::{Comment, NewComment};
use crate::models::content::{ContentPreview, ScrapeResponse, ScrapingStats, SummarizeResponse};
use crate::models::status::ContentStatus;
use crate::services::poller::StatusSource;

/// Errors surfaced by the client, matching the three failure classes the
/// rest of the crate cares about.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (connection refused, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("server returned {status}: {detail}")]
    Server { status: u16, detail: String },

    /// User input was rejected before any request was issued.
    #[error("invalid input: {0}")]
    Validation(String),
}

/// HTTP client for one curation backend.
pub struct CuratorApi {
    http: reqwest::Client,
    base_url: String,
}

impl CuratorApi {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("news-curator/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Start the content-scraping job for an article. Returns as soon as the
    /// backend accepts the job.
    pub async fn trigger_scrape(&self, news_id: i64) -> Result<ScrapeResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/content/scrape/{news_id}", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Start summary generation for an article.
    pub async fn trigger_summarize(&self, news_id: i64) -> Result<SummarizeResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/content/summarize/{news_id}", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch a fresh status snapshot for an article.
    pub async fn content_status(&self, news_id: i64) -> Result<ContentStatus, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/content/status/{news_id}", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch the full article record.
    pub async fn article(&self, news_id: i64) -> Result<Article, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/articles/{news_id}", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch a truncated view of an article's scraped content.
    pub async fn content_preview(
        &self,
        news_id: i64,
        language: Language,
        max_length: usize,
    ) -> Result<ContentPreview, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/content/preview/{news_id}", self.base_url))
            .query(&[
                ("language", language.to_string()),
                ("max_length", max_length.to_string()),
            ])
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch backend-wide scraping statistics.
    pub async fn scraping_stats(&self) -> Result<ScrapingStats, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/content/stats", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch an article's comments, oldest first.
    pub async fn comments(&self, news_id: i64) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/comments/{news_id}", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Post a comment on an article. The server assigns id and timestamp.
    pub async fn post_comment(
        &self,
        news_id: i64,
        comment: &NewComment,
    ) -> Result<Comment, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/comments", self.base_url))
            .query(&[("news_id", news_id)])
            .json(comment)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Fetch all curation categories.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/categories", self.base_url))
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Create a curation category.
    pub async fn create_category(&self, category: &NewCategory) -> Result<Category, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/categories", self.base_url))
            .json(category)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    /// Associate an article's summary with a category.
    pub async fn save_summary(
        &self,
        request: &SaveSummaryRequest,
    ) -> Result<SaveSummaryResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/categories/save-summary", self.base_url))
            .json(request)
            .send()
            .await?;
        Self::parse_json(response).await
    }

    // ---- private helpers ----

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        Ok(Self::ensure_success(response).await?.json().await?)
    }

    /// Return the response unchanged on success, or an [`ApiError::Server`]
    /// carrying the extracted detail message on failure.
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                detail: error_detail(status, &body),
            });
        }
        Ok(response)
    }
}

impl StatusSource for CuratorApi {
    fn fetch_status(
        &self,
        news_id: i64,
    ) -> impl Future<Output = Result<ContentStatus, ApiError>> + Send {
        self.content_status(news_id)
    }
}

/// Pull the `detail` message out of a JSON error body, falling back to the
/// raw body and finally to the canonical status reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_extracted_from_json_body() {
        let detail = error_detail(
            StatusCode::NOT_FOUND,
            r#"{"detail": "News article not found"}"#,
        );
        assert_eq!(detail, "News article not found");
    }

    #[test]
    fn non_json_body_used_verbatim() {
        let detail = error_detail(StatusCode::BAD_GATEWAY, "upstream exploded\n");
        assert_eq!(detail, "upstream exploded");
    }

    #[test]
    fn empty_body_falls_back_to_status_reason() {
        let detail = error_detail(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(detail, "Internal Server Error");
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let config = ClientConfig {
            api_base_url: "http://localhost:8000/".to_string(),
            ..ClientConfig::default()
        };
        let api = CuratorApi::new(&config).unwrap();
        assert_eq!(api.base_url, "http://localhost:8000");
    }
}
