use crate::news::{Page, Sentiment};
use crate::util::sanitize::sanitize_for_terminal;
use console::style;

/// Plain-text view of a prepared page, one headline per line.
pub fn listing_lines(page: &Page, summary_limit: usize) -> Vec<String> {
    if page.articles.is_empty() {
        // summary holds the failure message (or nothing) when there are no articles
        let msg = if page.summary.is_empty() { "No stories." } else { page.summary.as_str() };
        return vec![msg.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    for (i, a) in page.articles.iter().enumerate() {
        let tag = match a.sentiment {
            Some(Sentiment::Bullish) => style("[bullish]").green().bold().to_string(),
            Some(Sentiment::Bearish) => style("[bearish]").red().bold().to_string(),
            Some(Sentiment::Neutral) => style("[neutral]").dim().to_string(),
            None => String::new(),
        };
        lines.push(format!(
            "{:>3}. {} {} ({})",
            i + 1,
            tag,
            sanitize_for_terminal(&a.title),
            sanitize_for_terminal(&a.source.name)
        ));
    }
    lines.push(format!(
        "{} stories, top {} in summary",
        page.articles.len(),
        page.articles.len().min(summary_limit)
    ));
    lines
}

pub fn print_listing(page: &Page, summary_limit: usize) {
    for line in listing_lines(page, summary_limit) {
        println!("{}", line);
    }
}
