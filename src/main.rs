mod config;
mod news;
mod open_url;
mod render;
mod ui;
mod util;

use anyhow::{Context, Result, anyhow};
use config::RuntimeConfig;
use news::{AlphaVantageFeed, FeedSource, FileFeed, TemplateGenerator};
use std::{env, fs, path::PathBuf, time::Duration};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Default)]
struct Args {
    config: Option<String>,
    feed: Option<String>,
    out: Option<String>,
    list: bool,
    json: bool,
    open: bool,
    watch: bool,
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        print_help();
        return Ok(());
    };

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let cfg = config::load(args.config.clone(), config::api_key_from_env())?;
    if cfg.api_key == config::API_KEY_SENTINEL && args.feed.is_none() {
        tracing::warn!("{} is not set; upstream requests will likely fail", config::API_KEY_ENV);
    }

    let source: Box<dyn FeedSource> = match &args.feed {
        Some(path) => Box::new(FileFeed::new(path)),
        None => Box::new(AlphaVantageFeed::new(&cfg.endpoint, &cfg.topics, &cfg.api_key)?),
    };

    if !args.watch {
        return build_once(&cfg, &args, source.as_ref()).await;
    }

    let period = Duration::from_secs(cfg.refresh_hours.saturating_mul(3600));
    tracing::info!(hours = cfg.refresh_hours, "rebuilding page on a fixed interval");
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        if let Err(err) = build_once(&cfg, &args, source.as_ref()).await {
            tracing::error!(error = %format!("{err:#}"), "page build failed");
        }
    }
}

async fn build_once(cfg: &RuntimeConfig, args: &Args, source: &dyn FeedSource) -> Result<()> {
    let generator = TemplateGenerator::new(cfg.content_template.clone());
    let page = news::prepare_page(source, &generator, &cfg.page_options()).await;

    if args.list {
        ui::print_listing(&page, cfg.summary_limit);
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&page.articles)?);
        return Ok(());
    }

    let html = render::render_page(&page, cfg.refresh_hours);
    let out = args.out.as_deref().unwrap_or(&cfg.output);
    if out == "-" {
        print!("{}", html);
        return Ok(());
    }

    let path = PathBuf::from(out);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), articles = page.articles.len(), "page written");

    if args.open {
        if let Err(err) = open_url::open_page(&path, cfg.open_command.as_deref()) {
            tracing::warn!(error = %format!("{err:#}"), "could not open page");
        }
    }
    Ok(())
}

/// Minimal CLI parsing. `Ok(None)` means help was requested.
fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => args.config = Some(it.next().ok_or_else(|| anyhow!("--config needs a path"))?),
            "--feed" => args.feed = Some(it.next().ok_or_else(|| anyhow!("--feed needs a path"))?),
            "--out" => args.out = Some(it.next().ok_or_else(|| anyhow!("--out needs a path"))?),
            "--list" => args.list = true,
            "--json" => args.json = true,
            "--open" => args.open = true,
            "--watch" => args.watch = true,
            "-v" | "--verbose" => args.verbose = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }
    Ok(Some(args))
}

fn print_help() {
    println!("market-news");
    println!("Usage: market-news [--config <path>] [--feed <path>] [--out <path>] [--list | --json] [--open] [--watch] [-v]");
    println!("  --config <path>  Path to a config.toml");
    println!("  --feed <path>    Read a saved NEWS_SENTIMENT JSON response instead of calling the API");
    println!("  --out <path>     Where to write the HTML page ('-' for stdout)");
    println!("  --list           Print headlines with sentiment to the terminal");
    println!("  --json           Print the prepared articles as JSON");
    println!("  --open           Open the written page in a browser");
    println!("  --watch          Rebuild the page every refresh_hours");
    println!("  -v, --verbose    Debug logging (RUST_LOG overrides)");
    println!("Environment: {} holds the API key", config::API_KEY_ENV);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<Option<Args>> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags() {
        let args = parse(&["--feed", "saved.json", "--out", "-", "--list", "-v"]).unwrap().unwrap();
        assert_eq!(args.feed.as_deref(), Some("saved.json"));
        assert_eq!(args.out.as_deref(), Some("-"));
        assert!(args.list && args.verbose);
        assert!(!args.watch && !args.open && !args.json);
    }

    #[test]
    fn help_and_errors() {
        assert!(parse(&["--help"]).unwrap().is_none());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
    }

    #[tokio::test]
    async fn writes_page_from_local_feed() {
        let dir = tempfile::tempdir().unwrap();
        let feed_path = dir.path().join("feed.json");
        fs::write(
            &feed_path,
            r#"{"feed": [{"title": "Stocks surge on strong earnings growth", "summary": "Markets rally as profit beats forecasts", "url": "http://x", "banner_image": "", "time_published": "20240301T120000", "source": "ExampleWire"}]}"#,
        )
        .unwrap();
        let out_path = dir.path().join("site").join("index.html");

        let cfg = config::load(Some(write_empty_config(dir.path())), None).unwrap();
        let args = Args {
            out: Some(out_path.to_string_lossy().into_owned()),
            ..Args::default()
        };
        build_once(&cfg, &args, &FileFeed::new(&feed_path)).await.unwrap();

        let html = fs::read_to_string(&out_path).unwrap();
        assert!(html.contains("Stocks surge on strong earnings growth"));
        assert!(html.contains("bg-success"));
        assert!(html.contains("Mar 1, 2024 - ExampleWire"));
    }

    fn write_empty_config(dir: &std::path::Path) -> String {
        let p = dir.join("config.toml");
        fs::write(&p, "").unwrap();
        p.to_string_lossy().into_owned()
    }
}
