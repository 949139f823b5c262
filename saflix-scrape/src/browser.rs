//! Session traits and the WebDriver-backed capture path.
//!
//! The traits are the seam the resource-discipline contract hangs on: a
//! session is acquired once per capture and closed exactly once on every
//! exit path after acquisition, which the tests verify with a counting mock.

use anyhow::Result;
use async_trait::async_trait;
use saflix_common::{BrowserConfig, SaflixError};
use saflix_drivers::saflix_browser::{driver::SaflixDriver, page::SaflixPage};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// A rendered page pulled out of a live session.
#[derive(Debug, Clone)]
pub struct PageCapture {
    /// Resolved URL of the page, after any redirects.
    pub url: Url,
    /// Full rendered source.
    pub html: String,
}

/// One live browser session. Single-shot: navigate, read, close.
#[async_trait]
pub trait Session: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;
    async fn content(&self) -> Result<String>;
    async fn resolved_url(&self) -> Result<String>;
    /// Release the underlying browser. Idempotent; later calls are no-ops.
    async fn close(&mut self) -> Result<()>;
}

/// Produces sessions. One acquisition per request, no pooling.
#[async_trait]
pub trait SessionManager: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Session>>;
}

/// Concrete manager backed by the fantoccini driver.
pub struct WebDriverSessionManager {
    config: BrowserConfig,
}

impl WebDriverSessionManager {
    pub fn new(config: BrowserConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionManager for WebDriverSessionManager {
    async fn acquire(&self) -> Result<Box<dyn Session>> {
        let driver = SaflixDriver::new(&self.config).await?;
        let page = driver.new_page();
        Ok(Box::new(WebDriverSession {
            driver: Some(driver),
            page,
        }))
    }
}

struct WebDriverSession {
    driver: Option<SaflixDriver>,
    page: SaflixPage,
}

#[async_trait]
impl Session for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await
    }

    async fn content(&self) -> Result<String> {
        self.page.get_content().await
    }

    async fn resolved_url(&self) -> Result<String> {
        self.page.get_url().await
    }

    async fn close(&mut self) -> Result<()> {
        match self.driver.take() {
            Some(driver) => driver.close().await,
            None => Ok(()),
        }
    }
}

/// Acquire a session, navigate within the timeout, read the rendered page,
/// and close the session no matter how far we got.
///
/// Acquisition failure propagates with nothing to clean up. After that,
/// exactly one close happens on every path; a failing close is logged and
/// swallowed so it cannot mask the capture outcome.
pub async fn capture(
    manager: &dyn SessionManager,
    target: &Url,
    timeout_secs: u64,
) -> saflix_common::Result<PageCapture> {
    let mut session = manager.acquire().await.map_err(SaflixError::Driver)?;
    let result = capture_on(session.as_mut(), target, timeout_secs).await;
    if let Err(e) = session.close().await {
        warn!(target: "browser.session", error = %e, "failed to close browser session");
    }
    result
}

async fn capture_on(
    session: &mut dyn Session,
    target: &Url,
    timeout_secs: u64,
) -> saflix_common::Result<PageCapture> {
    let navigation = session.navigate(target.as_str());
    match tokio::time::timeout(Duration::from_secs(timeout_secs), navigation).await {
        Err(_) => return Err(SaflixError::NavigationTimeout(timeout_secs)),
        Ok(Err(e)) => return Err(SaflixError::Driver(e)),
        Ok(Ok(())) => {}
    }

    let html = session.content().await.map_err(SaflixError::Driver)?;
    let url = match session.resolved_url().await {
        Ok(resolved) => Url::parse(&resolved).unwrap_or_else(|_| target.clone()),
        // Some embeds leave the session on an opaque URL; fall back to what
        // we asked for rather than failing a capture we already have.
        Err(_) => target.clone(),
    };

    Ok(PageCapture { url, html })
}
