//! User-action layer.
//!
//! Each public method mirrors one action in the curation UI: it drives the
//! API client (and the status poller for the long-running jobs), catches
//! every failure, and surfaces results to the view as notices. Errors never
//! propagate past this layer; the caller always gets `()` back. The article
//! being acted on is an explicit argument on every call, never held as
//! ambient state.

use std::sync::Arc;
use std::time::Duration;

use garde::Validate;

use crate::config::ClientConfig;
use crate::models::category::{Category, NewCategory, SaveSummaryRequest};
use crate::models::comment::NewComment;
use crate::models::status::CompletionFlag;
use crate::services::api::{ApiError, CuratorApi};
use crate::services::poller::{PollJob, PollOutcome, StatusPoller};
use crate::view::{ArticleView, Notice, Severity};

/// Cadence for one family of background jobs.
#[derive(Debug, Clone, Copy)]
pub struct PollSettings {
    pub every: Duration,
    pub give_up_after: Duration,
}

pub struct CurationController {
    api: Arc<CuratorApi>,
    poller: StatusPoller<CuratorApi>,
    view: Arc<dyn ArticleView>,
    scrape_poll: PollSettings,
    summary_poll: PollSettings,
}

impl CurationController {
    pub fn new(api: Arc<CuratorApi>, view: Arc<dyn ArticleView>, config: &ClientConfig) -> Self {
        Self {
            poller: StatusPoller::new(Arc::clone(&api)),
            api,
            view,
            scrape_poll: PollSettings {
                every: Duration::from_millis(config.scrape_poll_interval_ms),
                give_up_after: Duration::from_millis(config.scrape_poll_timeout_ms),
            },
            summary_poll: PollSettings {
                every: Duration::from_millis(config.summary_poll_interval_ms),
                give_up_after: Duration::from_millis(config.summary_poll_timeout_ms),
            },
        }
    }

    /// Fetch an article and its comments and hand both to the view.
    pub async fn open_article(&self, news_id: i64) {
        match self.api.article(news_id).await {
            Ok(article) => self.view.article_loaded(&article),
            Err(err) => return self.report(err, "Failed to load article"),
        }
        self.load_comments(news_id).await;
    }

    /// Fetch an article's comments and hand them to the view.
    pub async fn load_comments(&self, news_id: i64) {
        match self.api.comments(news_id).await {
            Ok(comments) => self.view.comments_loaded(&comments),
            Err(err) => self.report(err, "Failed to load comments"),
        }
    }

    /// Fetch all categories and hand them to the view.
    pub async fn load_categories(&self) {
        match self.api.categories().await {
            Ok(categories) => self.view.categories_loaded(&categories),
            Err(err) => self.report(err, "Failed to load categories"),
        }
    }

    /// Trigger content scraping and watch the status flag until the job
    /// finishes or the time budget runs out.
    pub async fn scrape_content(&self, news_id: i64) {
        match self.api.trigger_scrape(news_id).await {
            Ok(_) => self.notify(Severity::Success, "Content scraping started successfully"),
            Err(err) => return self.report(err, "Scraping failed"),
        }
        self.watch(
            news_id,
            CompletionFlag::ContentScraped,
            self.scrape_poll,
            "Content scraping completed!",
        )
        .await;
    }

    /// Trigger summary generation and watch the status flag.
    pub async fn generate_summary(&self, news_id: i64) {
        match self.api.trigger_summarize(news_id).await {
            Ok(_) => self.notify(Severity::Success, "Summary generation started"),
            Err(err) => return self.report(err, "Summary generation failed"),
        }
        self.watch(
            news_id,
            CompletionFlag::Summarized,
            self.summary_poll,
            "Summary generation completed!",
        )
        .await;
    }

    /// Post a comment and refresh the comment list.
    pub async fn add_comment(&self, news_id: i64, comment: NewComment) {
        if let Err(report) = comment.validate() {
            return self.notify(Severity::Warning, &format!("Invalid comment: {report}"));
        }
        match self.api.post_comment(news_id, &comment).await {
            Ok(_) => {
                self.load_comments(news_id).await;
                self.notify(Severity::Success, "Comment added successfully!");
            }
            Err(err) => self.report(err, "Failed to add comment"),
        }
    }

    /// Create a category, returning it so callers can select it.
    pub async fn create_category(&self, category: NewCategory) -> Option<Category> {
        if let Err(report) = category.validate() {
            self.notify(Severity::Warning, &format!("Invalid category: {report}"));
            return None;
        }
        match self.api.create_category(&category).await {
            Ok(created) => {
                self.notify(Severity::Success, "Category created successfully!");
                Some(created)
            }
            Err(err) => {
                self.report(err, "Failed to create category");
                None
            }
        }
    }

    /// Save an article's summary into a category.
    pub async fn save_to_category(&self, request: SaveSummaryRequest) {
        if let Err(report) = request.validate() {
            return self.notify(
                Severity::Warning,
                &format!("Invalid save request: {report}"),
            );
        }
        match self.api.save_summary(&request).await {
            Ok(_) => self.notify(Severity::Success, "Article saved to category successfully"),
            Err(err) => self.report(err, "Failed to save to category"),
        }
    }

    /// Poll one completion flag to its terminal state. Completion refreshes
    /// the article and notifies; a failed check notifies; giving up and
    /// cancellation stay quiet on purpose.
    async fn watch(
        &self,
        news_id: i64,
        flag: CompletionFlag,
        settings: PollSettings,
        done_message: &str,
    ) {
        let job = match PollJob::new(news_id, flag, settings.every, settings.give_up_after) {
            Ok(job) => job,
            Err(err) => return self.notify(Severity::Error, &err.to_string()),
        };

        match self.poller.start(job).join().await {
            PollOutcome::Completed(_) => {
                match self.api.article(news_id).await {
                    Ok(article) => self.view.article_loaded(&article),
                    Err(err) => self.report(err, "Failed to load article"),
                }
                self.notify(Severity::Success, done_message);
            }
            PollOutcome::Failed(err) => self.report(err, "Status polling failed"),
            PollOutcome::TimedOut | PollOutcome::Cancelled => {
                tracing::debug!(news_id, flag = %flag, "poll ended without completion");
            }
        }
    }

    fn notify(&self, severity: Severity, message: &str) {
        self.view.notice(&Notice {
            severity,
            message: message.to_string(),
        });
    }

    fn report(&self, err: ApiError, context: &str) {
        tracing::debug!(error = %err, context, "operation failed");
        self.notify(Severity::Error, &format!("{context}: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingView {
        fn notices(&self) -> Vec<Notice> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl ArticleView for RecordingView {
        fn article_loaded(&self, _article: &crate::models::article::Article) {}
        fn comments_loaded(&self, _comments: &[crate::models::comment::Comment]) {}
        fn categories_loaded(&self, _categories: &[Category]) {}
        fn notice(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }
    }

    fn controller_with_view() -> (CurationController, Arc<RecordingView>) {
        let config = ClientConfig::default();
        let api = Arc::new(CuratorApi::new(&config).unwrap());
        let view = Arc::new(RecordingView::default());
        let controller =
            CurationController::new(api, Arc::clone(&view) as Arc<dyn ArticleView>, &config);
        (controller, view)
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_before_any_request() {
        let (controller, view) = controller_with_view();

        controller
            .add_comment(
                1,
                NewComment {
                    comment_text: "  ".to_string(),
                    user_name: None,
                    category_id: None,
                },
            )
            .await;

        let notices = view.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Warning);
        assert!(notices[0].message.contains("Invalid comment"));
    }

    #[tokio::test]
    async fn save_without_category_is_rejected_before_any_request() {
        let (controller, view) = controller_with_view();

        controller
            .save_to_category(SaveSummaryRequest {
                news_id: 1,
                category_id: 0,
                custom_title: None,
                notes: None,
                is_favorite: false,
            })
            .await;

        let notices = view.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Warning);
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected_before_any_request() {
        let (controller, view) = controller_with_view();

        let created = controller
            .create_category(NewCategory {
                name: "\t".to_string(),
                description: None,
                color: None,
            })
            .await;

        assert!(created.is_none());
        let notices = view.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Warning);
    }
}
