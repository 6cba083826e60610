use anyhow::Result;
use async_trait::async_trait;

pub const DEFAULT_TEMPLATE: &str = "This is an AI-generated blog post about \"{title}\". The article discusses: {description}. Further analysis suggests... [Continue with AI-generated insights and implications based on the summary].";

/// Produces the body text shown on an article card. A real model backend
/// can be plugged in here without touching normalization or scoring.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, title: &str, description: &str) -> Result<String>;
}

/// Deterministic placeholder: fills `{title}` and `{description}` into a
/// fixed sentence.
#[derive(Debug, Clone)]
pub struct TemplateGenerator {
    template: String,
}

impl TemplateGenerator {
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    async fn generate(&self, title: &str, description: &str) -> Result<String> {
        // Single pass so a `{description}` inside the title is left alone.
        let mut out = String::with_capacity(self.template.len() + title.len() + description.len());
        let mut rest = self.template.as_str();
        while let Some(pos) = rest.find('{') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            if let Some(after) = tail.strip_prefix("{title}") {
                out.push_str(title);
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{description}") {
                out.push_str(description);
                rest = after;
            } else {
                out.push('{');
                rest = &tail[1..];
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}
