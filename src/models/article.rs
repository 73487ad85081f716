use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the bilingual content fields to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    Zh,
    En,
}

/// A curated news article as returned by `GET /api/articles/{id}`.
///
/// Content, translation and summary fields are filled in by background jobs,
/// so most of them are optional until the corresponding flag is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub title_english: Option<String>,
    pub source_url: String,
    pub collection_date: NaiveDate,
    #[serde(default)]
    pub full_content: Option<String>,
    #[serde(default)]
    pub full_content_english: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub summary_english: Option<String>,
    #[serde(default)]
    pub content_language: Option<String>,
    #[serde(default)]
    pub source_domain: Option<String>,
    #[serde(default)]
    pub is_content_scraped: bool,
    #[serde(default)]
    pub is_content_translated: bool,
    #[serde(default)]
    pub is_summarized: bool,
    #[serde(default)]
    pub content_scraped_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content_translated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub summarized_at: Option<DateTime<Utc>>,
}

impl Article {
    /// Title in the requested language, falling back to the original.
    pub fn title_in(&self, lang: Language) -> &str {
        match lang {
            Language::En => self.title_english.as_deref().unwrap_or(&self.title),
            Language::Zh => &self.title,
        }
    }

    /// Full content in the requested language. The English side falls back
    /// to the original text when no translation exists yet.
    pub fn content_in(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::En => self
                .full_content_english
                .as_deref()
                .or(self.full_content.as_deref()),
            Language::Zh => self.full_content.as_deref(),
        }
    }

    /// Summary in the requested language, with the same fallback rule as
    /// [`Article::content_in`].
    pub fn summary_in(&self, lang: Language) -> Option<&str> {
        match lang {
            Language::En => self
                .summary_english
                .as_deref()
                .or(self.summary.as_deref()),
            Language::Zh => self.summary.as_deref(),
        }
    }
}
