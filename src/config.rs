use crate::news::{DEFAULT_TEMPLATE, Lexicon, PageOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};

pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";
pub const API_KEY_SENTINEL: &str = "YOUR_API_KEY";

const DEFAULT_ENDPOINT: &str = "https://www.alphavantage.co/query";
const DEFAULT_TOPICS: &str = "financial_markets";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";
const DEFAULT_OUTPUT: &str = "index.html";
/// One year; longer intervals are clamped.
pub const MAX_REFRESH_HOURS: u64 = 24 * 365;

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub topics: Option<String>,
    pub api_key: Option<String>,
    pub placeholder_image: Option<String>,
    pub summary_limit: Option<usize>,
    pub refresh_hours: Option<u64>,
    pub output: Option<String>,
    pub content_template: Option<String>,
    pub open_command: Option<String>,
    pub lexicon: Option<Lexicon>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub endpoint: String,
    pub topics: String,
    pub api_key: String,
    pub placeholder_image: String,
    pub summary_limit: usize,
    pub refresh_hours: u64,
    pub output: String,
    pub content_template: String,
    pub open_command: Option<String>,
    pub lexicon: Lexicon,
}

impl RuntimeConfig {
    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            placeholder_image: self.placeholder_image.clone(),
            summary_limit: self.summary_limit,
            lexicon: self.lexicon.clone(),
        }
    }

    fn from_file(parsed: AppConfig, env_api_key: Option<String>) -> Self {
        let api_key = env_api_key
            .filter(|k| !k.is_empty())
            .or(parsed.api_key)
            .unwrap_or_else(|| API_KEY_SENTINEL.into());
        RuntimeConfig {
            endpoint: parsed.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            topics: parsed.topics.unwrap_or_else(|| DEFAULT_TOPICS.into()),
            api_key,
            placeholder_image: parsed
                .placeholder_image
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.into()),
            summary_limit: parsed.summary_limit.unwrap_or(10),
            refresh_hours: parsed.refresh_hours.unwrap_or(24).clamp(1, MAX_REFRESH_HOURS),
            output: parsed.output.unwrap_or_else(|| DEFAULT_OUTPUT.into()),
            content_template: parsed
                .content_template
                .unwrap_or_else(|| DEFAULT_TEMPLATE.into()),
            open_command: parsed.open_command,
            lexicon: parsed.lexicon.unwrap_or_default(),
        }
    }
}

/// Resolve the runtime config: an explicit `--config` path must exist and
/// parse; otherwise the default location is tried, then built-in defaults.
/// The API key from the environment wins over the file.
pub fn load(config_override: Option<String>, env_api_key: Option<String>) -> Result<RuntimeConfig> {
    if let Some(path_str) = config_override {
        let parsed = read_file(Path::new(&path_str))?;
        return Ok(RuntimeConfig::from_file(parsed, env_api_key));
    }

    if let Some(path) = default_config_path() {
        if path.is_file() {
            let parsed = read_file(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            return Ok(RuntimeConfig::from_file(parsed, env_api_key));
        }
    }

    // Built-in defaults
    Ok(RuntimeConfig::from_file(AppConfig::default(), env_api_key))
}

/// API key as set in the process environment, if any.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_ENV).ok()
}

fn read_file(path: &Path) -> Result<AppConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push("market-news");
        p.push("config.toml");
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push("market-news");
        p.push("config.toml");
        return Some(p);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_without_file() {
        let cfg = RuntimeConfig::from_file(AppConfig::default(), None);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.topics, "financial_markets");
        assert_eq!(cfg.api_key, API_KEY_SENTINEL);
        assert_eq!(cfg.placeholder_image, "https://via.placeholder.com/150");
        assert_eq!(cfg.summary_limit, 10);
        assert_eq!(cfg.refresh_hours, 24);
        assert_eq!(cfg.output, "index.html");
        assert_eq!(cfg.content_template, DEFAULT_TEMPLATE);
        assert_eq!(cfg.lexicon, Lexicon::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let f = write_config(
            r#"
topics = "technology,earnings"
api_key = "from-file"
summary_limit = 5
content_template = "{title}: {description}"

[lexicon]
bullish = ["moon"]
"#,
        );
        let cfg = load(Some(f.path().to_string_lossy().into_owned()), None).unwrap();
        assert_eq!(cfg.topics, "technology,earnings");
        assert_eq!(cfg.api_key, "from-file");
        assert_eq!(cfg.summary_limit, 5);
        assert_eq!(cfg.content_template, "{title}: {description}");
        assert_eq!(cfg.lexicon.bullish, vec!["moon".to_string()]);
        // unspecified list keeps the built-in terms
        assert_eq!(cfg.lexicon.bearish, Lexicon::default().bearish);
    }

    #[test]
    fn refresh_hours_is_clamped() {
        let f = write_config("refresh_hours = 9000000000000000\n");
        let cfg = load(Some(f.path().to_string_lossy().into_owned()), None).unwrap();
        assert_eq!(cfg.refresh_hours, MAX_REFRESH_HOURS);

        let f = write_config("refresh_hours = 0\n");
        let cfg = load(Some(f.path().to_string_lossy().into_owned()), None).unwrap();
        assert_eq!(cfg.refresh_hours, 1);
    }

    #[test]
    fn env_key_wins_over_file() {
        let f = write_config("api_key = \"from-file\"\n");
        let path = f.path().to_string_lossy().into_owned();
        let cfg = load(Some(path.clone()), Some("from-env".into())).unwrap();
        assert_eq!(cfg.api_key, "from-env");

        let cfg = load(Some(path), Some(String::new())).unwrap();
        assert_eq!(cfg.api_key, "from-file");
    }

    #[test]
    fn explicit_path_errors_surface() {
        assert!(load(Some("/definitely/not/here.toml".into()), None).is_err());
        let f = write_config("summary_limit = \"ten\"\n");
        assert!(load(Some(f.path().to_string_lossy().into_owned()), None).is_err());
    }
}
