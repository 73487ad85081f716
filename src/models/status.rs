use serde::{Deserialize, Serialize};
use strum::Display;

/// Background jobs the backend reports a completion flag for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CompletionFlag {
    ContentScraped,
    Summarized,
}

impl CompletionFlag {
    /// Name of the boolean field this flag reads on a status snapshot.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::ContentScraped => "is_content_scraped",
            Self::Summarized => "is_summarized",
        }
    }
}

/// Point-in-time status record for one article, as returned by
/// `GET /api/content/status/{id}`.
///
/// Fetched fresh on every poll tick and never mutated. Fields the backend
/// does not send default to false/empty, and unknown fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentStatus {
    #[serde(default)]
    pub news_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_content_scraped: bool,
    #[serde(default)]
    pub is_content_translated: bool,
    #[serde(default)]
    pub is_summarized: bool,
    #[serde(default)]
    pub content_length: i64,
    #[serde(default)]
    pub translated_content_length: i64,
    #[serde(default)]
    pub source_domain: Option<String>,
    #[serde(default)]
    pub content_language: Option<String>,
}

impl ContentStatus {
    /// Value of the given completion flag in this snapshot.
    pub fn flag(&self, flag: CompletionFlag) -> bool {
        match flag {
            CompletionFlag::ContentScraped => self.is_content_scraped,
            CompletionFlag::Summarized => self.is_summarized,
        }
    }
}
