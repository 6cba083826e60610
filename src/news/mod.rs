mod content;
mod fetch;
mod model;
mod normalize;
mod sentiment;

use crate::util::sanitize::escape_html;
use futures_util::future::join_all;
use time::OffsetDateTime;

pub use content::{ContentGenerator, DEFAULT_TEMPLATE, TemplateGenerator};
pub use fetch::{AlphaVantageFeed, FeedSource, FileFeed};
pub use model::{Article, ArticleSource, RawFeedItem, Sentiment};
pub use normalize::normalize;
pub use sentiment::Lexicon;

pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch top stories.";

/// Knobs for one page build.
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub placeholder_image: String,
    pub summary_limit: usize,
    pub lexicon: Lexicon,
}

/// Everything the renderer needs. `summary` is HTML.
#[derive(Debug, Clone)]
pub struct Page {
    pub articles: Vec<Article>,
    pub summary: String,
}

impl Page {
    fn fetch_failed() -> Self {
        Page {
            articles: Vec::new(),
            summary: FETCH_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Fetch, normalize, score and annotate the feed. An upstream failure is
/// logged and produces an empty page rather than an error.
pub async fn prepare_page(
    source: &dyn FeedSource,
    generator: &dyn ContentGenerator,
    opts: &PageOptions,
) -> Page {
    let raw = match source.fetch_items().await {
        Ok(items) => items,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "error fetching news");
            return Page::fetch_failed();
        }
    };

    let now = OffsetDateTime::now_utc();
    // Articles are independent; join_all keeps feed order.
    let articles = join_all(
        raw.into_iter()
            .map(|item| prepare_article(item, generator, opts, now)),
    )
    .await;

    let summary = build_summary(&articles, opts.summary_limit);
    tracing::info!(articles = articles.len(), "page prepared");
    Page { articles, summary }
}

async fn prepare_article(
    raw: RawFeedItem,
    generator: &dyn ContentGenerator,
    opts: &PageOptions,
    now: OffsetDateTime,
) -> Article {
    let mut article = normalize(raw, &opts.placeholder_image, now);
    article.sentiment = Some(opts.lexicon.classify(&article.title, &article.description));
    match generator.generate(&article.title, &article.description).await {
        Ok(text) => article.generated_content = Some(text),
        Err(err) => tracing::warn!(title = %article.title, error = %err, "content generation failed"),
    }
    article
}

/// One anchor per leading article, pointing at its card, with the
/// sentiment badge. Lines are joined with `<br/>`.
pub fn build_summary(articles: &[Article], limit: usize) -> String {
    articles
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, a)| {
            let sentiment = a.sentiment.unwrap_or(Sentiment::Neutral);
            format!(
                "<a href=\"#article-{}\" style=\"scroll-behavior: smooth;\">{}</a> <span class=\"badge bg-{}\">{}</span>",
                i,
                escape_html(&a.title),
                sentiment.badge_color(),
                sentiment
            )
        })
        .collect::<Vec<_>>()
        .join("<br/>")
}
