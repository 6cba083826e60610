use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One entry of the upstream `feed` array. Every field is optional and a
/// field of the wrong JSON type is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFeedItem {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub url: Option<String>,
    pub banner_image: Option<String>,
    pub time_published: Option<String>,
    pub source: Option<String>,
}

impl RawFeedItem {
    pub fn from_value(v: &Value) -> Self {
        let text = |key: &str| v.get(key).and_then(|x| x.as_str()).map(str::to_string);
        // `source` shows up both as a plain string and as {"name": "..."}
        let source = match v.get("source") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(obj)) => obj.get("name").and_then(|x| x.as_str()).map(str::to_string),
            _ => None,
        };
        RawFeedItem {
            title: text("title"),
            summary: text("summary"),
            url: text("url"),
            banner_image: text("banner_image"),
            time_published: text("time_published"),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Bootstrap color suffix used for the badge (`bg-success`, ...).
    pub fn badge_color(self) -> &'static str {
        match self {
            Sentiment::Bullish => "success",
            Sentiment::Bearish => "danger",
            Sentiment::Neutral => "secondary",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub url_to_image: String,
    pub published_at: String,
    pub source: ArticleSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}
