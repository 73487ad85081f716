use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::not_blank;

/// A personal curation category, as returned by `GET /api/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCategory {
    #[garde(custom(not_blank), length(max = 100))]
    pub name: String,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Payload for `POST /api/categories/save-summary`, associating an article's
/// summary with a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveSummaryRequest {
    #[garde(range(min = 1))]
    pub news_id: i64,
    #[garde(range(min = 1))]
    pub category_id: i64,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub is_favorite: bool,
}

/// Confirmation record for a saved summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSummaryResponse {
    pub id: i64,
    pub news_id: i64,
    pub category_id: i64,
    pub custom_title: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub saved_at: DateTime<Utc>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_name_is_rejected() {
        let category = NewCategory {
            name: "  ".to_string(),
            description: None,
            color: None,
        };
        assert!(category.validate().is_err());
    }

    #[test]
    fn save_request_requires_positive_ids() {
        let request = SaveSummaryRequest {
            news_id: 12,
            category_id: 0,
            custom_title: None,
            notes: None,
            is_favorite: false,
        };
        assert!(request.validate().is_err());

        let request = SaveSummaryRequest {
            category_id: 4,
            ..request
        };
        assert!(request.validate().is_ok());
    }
}
