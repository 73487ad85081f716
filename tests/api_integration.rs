//! End-to-end tests against an in-process stub of the curation backend.
//!
//! The stub serves the real wire shapes, so these tests exercise the full
//! client path: reqwest, JSON decoding, the status poller and the
//! controller's notice policy.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use news_curator::config::ClientConfig;
use news_curator::controller::CurationController;
use news_curator::models::article::Article;
use news_curator::models::category::Category;
use news_curator::models::comment::{Comment, NewComment};
use news_curator::services::api::{ApiError, CuratorApi};
use news_curator::view::{ArticleView, Notice, Severity};

/// Article id the stub pretends not to know.
const MISSING_ARTICLE_ID: i64 = 999;

#[derive(Default)]
struct BackendState {
    comments: Mutex<Vec<Comment>>,
    next_comment_id: AtomicI64,
    status_checks: AtomicU32,
    /// The scrape flag turns true once this many status checks have landed.
    scrape_ready_after: u32,
    /// When set, every status check answers HTTP 500.
    fail_status: bool,
}

async fn trigger_scrape(Path(news_id): Path<i64>) -> (StatusCode, Json<Value>) {
    if news_id == MISSING_ARTICLE_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "News article not found"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"success": true, "message": "Content scraping started"})),
    )
}

async fn content_status(
    State(state): State<Arc<BackendState>>,
    Path(news_id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let checks = state.status_checks.fetch_add(1, Ordering::SeqCst) + 1;
    if state.fail_status {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "status backend exploded"})),
        );
    }
    let scraped = checks >= state.scrape_ready_after;
    (
        StatusCode::OK,
        Json(json!({
            "news_id": news_id,
            "is_content_scraped": scraped,
            "is_content_translated": false,
            "is_summarized": false,
            "content_length": if scraped { 420 } else { 0 }
        })),
    )
}

async fn article(Path(news_id): Path<i64>) -> Json<Value> {
    Json(json!({
        "id": news_id,
        "title": "测试文章",
        "title_english": "Test article",
        "source_url": "https://example.cn/article/1",
        "collection_date": "2026-08-01",
        "full_content": "正文内容",
        "is_content_scraped": true,
        "is_content_translated": false,
        "is_summarized": false
    }))
}

async fn list_comments(
    State(state): State<Arc<BackendState>>,
    Path(_news_id): Path<i64>,
) -> Json<Vec<Comment>> {
    Json(state.comments.lock().unwrap().clone())
}

#[derive(Deserialize)]
struct CommentQuery {
    news_id: i64,
}

async fn post_comment(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<CommentQuery>,
    Json(body): Json<NewComment>,
) -> (StatusCode, Json<Comment>) {
    let comment = Comment {
        id: state.next_comment_id.fetch_add(1, Ordering::SeqCst) + 1,
        news_id: Some(query.news_id),
        comment_text: body.comment_text,
        user_name: body.user_name,
        category_id: body.category_id,
        category_name: None,
        created_at: Utc::now(),
    };
    state.comments.lock().unwrap().push(comment.clone());
    (StatusCode::OK, Json(comment))
}

async fn spawn_backend(state: Arc<BackendState>) -> String {
    let app = Router::new()
        .route("/api/content/scrape/{id}", post(trigger_scrape))
        .route("/api/content/status/{id}", get(content_status))
        .route("/api/articles/{id}", get(article))
        .route("/api/comments/{id}", get(list_comments))
        .route("/api/comments", post(post_comment))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub backend address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub backend died");
    });
    format!("http://{addr}")
}

fn fast_config(base_url: String) -> ClientConfig {
    ClientConfig {
        api_base_url: base_url,
        scrape_poll_interval_ms: 25,
        scrape_poll_timeout_ms: 2_000,
        summary_poll_interval_ms: 25,
        summary_poll_timeout_ms: 2_000,
        ..ClientConfig::default()
    }
}

#[derive(Default)]
struct RecordingView {
    notices: Mutex<Vec<Notice>>,
    articles: Mutex<Vec<Article>>,
    comment_batches: Mutex<Vec<Vec<Comment>>>,
}

impl RecordingView {
    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl ArticleView for RecordingView {
    fn article_loaded(&self, article: &Article) {
        self.articles.lock().unwrap().push(article.clone());
    }
    fn comments_loaded(&self, comments: &[Comment]) {
        self.comment_batches.lock().unwrap().push(comments.to_vec());
    }
    fn categories_loaded(&self, _categories: &[Category]) {}
    fn notice(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

fn controller_for(
    base_url: String,
) -> (CurationController, Arc<RecordingView>) {
    let config = fast_config(base_url);
    let api = Arc::new(CuratorApi::new(&config).expect("build client"));
    let view = Arc::new(RecordingView::default());
    let controller =
        CurationController::new(api, Arc::clone(&view) as Arc<dyn ArticleView>, &config);
    (controller, view)
}

#[tokio::test]
async fn posted_comment_round_trips_with_server_timestamp() {
    let state = Arc::new(BackendState::default());
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let api = CuratorApi::new(&fast_config(base_url)).expect("build client");

    let posted = api
        .post_comment(
            7,
            &NewComment {
                comment_text: "值得收藏的分析".to_string(),
                user_name: Some("reader".to_string()),
                category_id: None,
            },
        )
        .await
        .expect("post comment");

    let comments = api.comments(7).await.expect("list comments");
    let found = comments
        .iter()
        .find(|c| c.id == posted.id)
        .expect("posted comment is listed");

    assert_eq!(found.comment_text, "值得收藏的分析");
    assert_eq!(found.created_at, posted.created_at);
    assert_eq!(found.user_name.as_deref(), Some("reader"));
}

#[tokio::test]
async fn adding_a_comment_refreshes_the_rendered_list() {
    let state = Arc::new(BackendState::default());
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let (controller, view) = controller_for(base_url);

    controller
        .add_comment(
            7,
            NewComment {
                comment_text: "第一条评论".to_string(),
                user_name: None,
                category_id: None,
            },
        )
        .await;

    let notices = view.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Success);
    assert_eq!(notices[0].message, "Comment added successfully!");

    let batches = view.comment_batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0][0].comment_text, "第一条评论");
    assert_eq!(batches[0][0].user_name, None);
}

#[tokio::test]
async fn scrape_flow_polls_until_the_flag_flips() {
    let state = Arc::new(BackendState {
        scrape_ready_after: 3,
        ..BackendState::default()
    });
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let (controller, view) = controller_for(base_url);

    controller.scrape_content(1).await;

    assert_eq!(state.status_checks.load(Ordering::SeqCst), 3);

    let notices = view.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0].severity, Severity::Success);
    assert_eq!(notices[0].message, "Content scraping started successfully");
    assert_eq!(notices[1].severity, Severity::Success);
    assert_eq!(notices[1].message, "Content scraping completed!");

    // Completion re-fetches the article for the view.
    let articles = view.articles.lock().unwrap();
    assert_eq!(articles.len(), 1);
    assert!(articles[0].is_content_scraped);
}

#[tokio::test]
async fn failing_status_check_stops_the_poll_loudly() {
    let state = Arc::new(BackendState {
        fail_status: true,
        ..BackendState::default()
    });
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let (controller, view) = controller_for(base_url);

    controller.scrape_content(1).await;

    // Fail-fast: one status check, then the error notice.
    assert_eq!(state.status_checks.load(Ordering::SeqCst), 1);

    let notices = view.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[1].severity, Severity::Error);
    assert!(notices[1].message.contains("status backend exploded"));
}

#[tokio::test]
async fn rejected_trigger_surfaces_the_detail_message() {
    let state = Arc::new(BackendState::default());
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let (controller, view) = controller_for(base_url);

    controller.scrape_content(MISSING_ARTICLE_ID).await;

    // No poll is started for a rejected trigger.
    assert_eq!(state.status_checks.load(Ordering::SeqCst), 0);

    let notices = view.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].severity, Severity::Error);
    assert!(notices[0].message.contains("News article not found"));
}

#[tokio::test]
async fn server_error_maps_to_api_error_with_detail() {
    let state = Arc::new(BackendState {
        fail_status: true,
        ..BackendState::default()
    });
    let base_url = spawn_backend(Arc::clone(&state)).await;
    let api = CuratorApi::new(&fast_config(base_url)).expect("build client");

    let err = api.content_status(1).await.unwrap_err();
    match err {
        ApiError::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail, "status backend exploded");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}
