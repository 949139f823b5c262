use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use saflix_common::observability::{init_logging, LogConfig};
use saflix_config::SaflixConfigLoader;
use saflix_scrape::browser::WebDriverSessionManager;
use saflix_scrape::catalog::Catalog;
use tracing::info;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "saflix", about = "Headless-browser proxy for one movie-listing site")]
struct Cli {
    /// Path to the YAML configuration file. Missing file means defaults.
    #[arg(long, default_value = "saflix.yaml")]
    config: PathBuf,

    /// Override the configured bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins), then logging.
    let cfg = SaflixConfigLoader::new().with_file(&cli.config).load()?;
    let log_path = init_logging(LogConfig::default())?;

    let browser = cfg.browser.to_browser_config();
    let site = Url::parse(&cfg.site.base_url)?;

    let manager = Arc::new(WebDriverSessionManager::new(browser.clone()));
    let catalog = Arc::new(Catalog::new(
        manager,
        site.clone(),
        browser.navigation_timeout_secs,
    ));
    let app = saflix_api::router(catalog);

    let host = cli.host.unwrap_or(cfg.server.host);
    let port = cli.port.unwrap_or(cfg.server.port);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    info!(target: "app", site = %site, webdriver = %browser.webdriver_url, log = %log_path.display(), "starting saflix");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "app", %addr, "API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
