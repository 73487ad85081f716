//! View seam between the client core and whatever renders it.
//!
//! The core never prints or draws; it hands records and notices to an
//! [`ArticleView`] implementation. The CLI uses [`ConsoleView`]; tests use a
//! recording view.

use strum::Display;

use crate::models::article::{Article, Language};
use crate::models::category::Category;
use crate::models::comment::Comment;

/// How a transient notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

/// A transient, auto-dismissing message for the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Observer for everything the core wants rendered.
pub trait ArticleView: Send + Sync {
    fn article_loaded(&self, article: &Article);
    fn comments_loaded(&self, comments: &[Comment]);
    fn categories_loaded(&self, categories: &[Category]);
    fn notice(&self, notice: &Notice);
}

/// Renders to stdout, reading the bilingual fields in one language.
pub struct ConsoleView {
    language: Language,
}

impl ConsoleView {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

fn badge(done: bool) -> &'static str {
    if done {
        "complete"
    } else {
        "pending"
    }
}

impl ArticleView for ConsoleView {
    fn article_loaded(&self, article: &Article) {
        println!("# {}", article.title_in(self.language));
        println!(
            "content: {} | translation: {} | summary: {}",
            badge(article.is_content_scraped),
            badge(article.is_content_translated),
            badge(article.is_summarized),
        );
        println!("source: {}", article.source_url);

        if let Some(summary) = article.summary_in(self.language) {
            println!("\n## Summary\n{summary}");
        }
        if let Some(content) = article.content_in(self.language) {
            println!("\n## Content\n{content}");
        }
    }

    fn comments_loaded(&self, comments: &[Comment]) {
        println!("\nComments ({})", comments.len());
        if comments.is_empty() {
            println!("No comments yet.");
            return;
        }
        for comment in comments {
            let author = comment.user_name.as_deref().unwrap_or("Anonymous");
            let date = comment.created_at.format("%Y-%m-%d %H:%M");
            match comment.category_name.as_deref() {
                Some(category) => {
                    println!("- {author} ({date}) [{category}]: {}", comment.comment_text)
                }
                None => println!("- {author} ({date}): {}", comment.comment_text),
            }
        }
    }

    fn categories_loaded(&self, categories: &[Category]) {
        println!("Categories ({})", categories.len());
        for category in categories {
            match category.description.as_deref() {
                Some(description) => {
                    println!("- [{}] {}: {description}", category.id, category.name)
                }
                None => println!("- [{}] {}", category.id, category.name),
            }
        }
    }

    fn notice(&self, notice: &Notice) {
        println!("[{}] {}", notice.severity, notice.message);
    }
}
