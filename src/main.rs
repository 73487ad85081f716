use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use news_curator::config::ClientConfig;
use news_curator::controller::CurationController;
use news_curator::models::article::Language;
use news_curator::models::category::{NewCategory, SaveSummaryRequest};
use news_curator::models::comment::NewComment;
use news_curator::services::api::{ApiError, CuratorApi};
use news_curator::view::{ArticleView, ConsoleView};

#[derive(Parser)]
#[command(name = "news-curator", version, about = "Client for the news curation backend")]
struct Cli {
    /// Backend base URL (overrides API_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Language for the bilingual fields.
    #[arg(long, global = true, default_value = "zh")]
    lang: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show an article with its comments
    Article { news_id: i64 },
    /// Trigger content scraping and wait for it to finish
    Scrape { news_id: i64 },
    /// Trigger summary generation and wait for it to finish
    Summarize { news_id: i64 },
    /// Show the raw status flags for an article
    Status { news_id: i64 },
    /// Preview an article's scraped content
    Preview {
        news_id: i64,
        /// Maximum preview length in characters
        #[arg(long, default_value_t = 500)]
        length: usize,
    },
    /// Show backend-wide scraping statistics
    Stats,
    /// List an article's comments
    Comments { news_id: i64 },
    /// Post a comment on an article
    Comment {
        news_id: i64,
        #[arg(long)]
        text: String,
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    /// List curation categories
    Categories,
    /// Create a curation category
    NewCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Save an article's summary to a category
    Save {
        news_id: i64,
        #[arg(long)]
        category: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().expect("Failed to load configuration");
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }

    let api = Arc::new(CuratorApi::new(&config).expect("Failed to build HTTP client"));
    let view = Arc::new(ConsoleView::new(cli.lang));
    let controller = CurationController::new(Arc::clone(&api), view.clone(), &config);

    match cli.command {
        Command::Article { news_id } => controller.open_article(news_id).await,
        Command::Scrape { news_id } => controller.scrape_content(news_id).await,
        Command::Summarize { news_id } => controller.generate_summary(news_id).await,
        Command::Status { news_id } => print_json(api.content_status(news_id).await),
        Command::Preview { news_id, length } => {
            match api.content_preview(news_id, cli.lang, length).await {
                Ok(preview) => {
                    println!("# {} ({})", preview.title, preview.language);
                    println!("{}", preview.preview);
                    if preview.is_truncated {
                        println!("... ({} characters total)", preview.full_length);
                    }
                }
                Err(err) => fail(err),
            }
        }
        Command::Stats => print_json(api.scraping_stats().await),
        Command::Comments { news_id } => {
            match api.comments(news_id).await {
                Ok(comments) => view.comments_loaded(&comments),
                Err(err) => fail(err),
            }
        }
        Command::Comment {
            news_id,
            text,
            user,
            category,
        } => {
            controller
                .add_comment(
                    news_id,
                    NewComment {
                        comment_text: text,
                        user_name: user,
                        category_id: category,
                    },
                )
                .await
        }
        Command::Categories => controller.load_categories().await,
        Command::NewCategory {
            name,
            description,
            color,
        } => {
            controller
                .create_category(NewCategory {
                    name,
                    description,
                    color,
                })
                .await;
        }
        Command::Save {
            news_id,
            category,
            title,
            notes,
            favorite,
        } => {
            controller
                .save_to_category(SaveSummaryRequest {
                    news_id,
                    category_id: category,
                    custom_title: title,
                    notes,
                    is_favorite: favorite,
                })
                .await
        }
    }
}

fn print_json<T: serde::Serialize>(result: Result<T, ApiError>) {
    match result {
        Ok(value) => println!(
            "{}",
            serde_json::to_string_pretty(&value).expect("Failed to serialize response")
        ),
        Err(err) => fail(err),
    }
}

fn fail(err: ApiError) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
