use super::model::{Article, ArticleSource, RawFeedItem};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNTITLED: &str = "(untitled)";

/// Map one upstream record into an [`Article`]. Never fails: every missing
/// or malformed field degrades to a default.
pub fn normalize(raw: RawFeedItem, placeholder_image: &str, now: OffsetDateTime) -> Article {
    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| UNTITLED.into());

    let url_to_image = raw
        .banner_image
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| placeholder_image.to_string());

    let published_at = match raw.time_published.as_deref() {
        Some(compact) => reformat_compact_timestamp(compact).unwrap_or_else(|| {
            tracing::debug!(value = compact, "unparseable time_published, using current time");
            now_iso(now)
        }),
        None => now_iso(now),
    };

    let name = raw
        .source
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_SOURCE.into());

    Article {
        title,
        description: raw.summary.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
        url_to_image,
        published_at,
        source: ArticleSource { name },
        generated_content: None,
        sentiment: None,
    }
}

/// `YYYYMMDDTHHMMSS` -> `YYYY-MM-DDTHH:MM:SS`, no timezone attached.
/// Only the shape is checked; field values are passed through as sent.
pub fn reformat_compact_timestamp(compact: &str) -> Option<String> {
    let b = compact.as_bytes();
    let well_formed = b.len() == 15
        && b.iter()
            .enumerate()
            .all(|(i, c)| if i == 8 { *c == b'T' } else { c.is_ascii_digit() });
    if !well_formed {
        return None;
    }
    Some(format!(
        "{}-{}-{}T{}:{}:{}",
        &compact[0..4],
        &compact[4..6],
        &compact[6..8],
        &compact[9..11],
        &compact[11..13],
        &compact[13..15]
    ))
}

fn now_iso(now: OffsetDateTime) -> String {
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}
