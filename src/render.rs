use crate::news::{Article, Page};
use crate::util::sanitize::escape_html;
use time::Date;
use time::macros::format_description;

/// Render the full HTML document for a prepared page.
pub fn render_page(page: &Page, refresh_hours: u64) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">\n",
        refresh_hours.saturating_mul(3600)
    ));
    out.push_str("<title>Financial News</title>\n");
    out.push_str("<meta name=\"description\" content=\"The latest financial news\">\n");
    out.push_str("<link rel=\"stylesheet\" href=\"https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css\">\n");
    out.push_str("</head>\n<body>\n<div class=\"container\">\n<main class=\"py-5\">\n");
    out.push_str("<h1 class=\"text-center mb-4\">Financial News</h1>\n");

    // Summary is already HTML (anchors + badges, or the failure message).
    out.push_str("<div class=\"card mb-4\">\n<div class=\"card-body\">\n");
    out.push_str("<h2 class=\"card-title\">Today's Top Stories</h2>\n");
    out.push_str(&format!("<p class=\"card-text\">{}</p>\n", page.summary));
    out.push_str("</div>\n</div>\n");

    out.push_str("<div class=\"row\">\n");
    for (i, article) in page.articles.iter().enumerate() {
        out.push_str(&render_card(i, article));
    }
    out.push_str("</div>\n</main>\n</div>\n</body>\n</html>\n");
    out
}

fn render_card(index: usize, a: &Article) -> String {
    let body = a.generated_content.as_deref().unwrap_or(&a.description);
    let badge = a
        .sentiment
        .map(|s| format!(" <span class=\"badge ms-2 bg-{}\">{}</span>", s.badge_color(), s))
        .unwrap_or_default();

    format!(
        "<div class=\"col-md-4 mb-4\" id=\"article-{index}\">\n\
         <div class=\"card\">\n\
         <img src=\"{img}\" class=\"card-img-top\" alt=\"{title}\">\n\
         <div class=\"card-body\">\n\
         <h5 class=\"card-title\">{title}</h5>\n\
         <p class=\"card-text\">{body}</p>\n\
         <a href=\"{url}\" class=\"btn btn-primary\" target=\"_blank\" rel=\"noopener noreferrer\">Read More</a>\n\
         </div>\n\
         <div class=\"card-footer\">\n\
         <small class=\"text-muted\">{date} - {source}</small>{badge}\n\
         </div>\n\
         </div>\n\
         </div>\n",
        img = escape_html(&a.url_to_image),
        title = escape_html(&a.title),
        body = escape_html(body),
        url = escape_html(&a.url),
        date = escape_html(&display_date(&a.published_at)),
        source = escape_html(&a.source.name),
    )
}

/// Calendar date only, e.g. `Mar 1, 2024`. Unparseable input is shown as is.
pub fn display_date(published_at: &str) -> String {
    let Some(day) = published_at.get(..10) else {
        return published_at.to_string();
    };
    match Date::parse(day, format_description!("[year]-[month]-[day]")) {
        Ok(d) => d
            .format(format_description!(
                "[month repr:short] [day padding:none], [year]"
            ))
            .unwrap_or_else(|_| day.to_string()),
        Err(_) => published_at.to_string(),
    }
}
