use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};

use super::not_blank;

/// A reader comment attached to an article, as returned by
/// `GET /api/comments/{id}`. `created_at` is assigned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub news_id: Option<i64>,
    pub comment_text: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /api/comments?news_id={id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewComment {
    #[garde(custom(not_blank), length(max = 4000))]
    pub comment_text: String,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[garde(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}
