use crate::saflix_browser::{
    behavioral::BehavioralEngine, page::SaflixPage, stealth::build_launch_arguments,
};
use anyhow::Result;
use fantoccini::ClientBuilder;
use saflix_common::BrowserConfig;
use serde_json::json;
use std::collections::HashMap;
use webdriver::capabilities::Capabilities;

/// Thin wrapper around a `fantoccini` WebDriver client.
///
/// One driver is one browser session: acquired at the start of a request,
/// closed when the request finishes, never pooled or reused. All launch
/// behavior comes from the [`BrowserConfig`] handed in at construction.
pub struct SaflixDriver {
    pub client: fantoccini::Client,
    config: BrowserConfig,
    behavioral_engine: BehavioralEngine,
}

impl SaflixDriver {
    /// Create a new driver connected to the configured WebDriver service.
    ///
    /// Fails when the WebDriver endpoint is unreachable or the browser
    /// executable cannot be started, which is fatal for the request.
    pub async fn new(config: &BrowserConfig) -> Result<Self> {
        let mut caps = Capabilities::new();
        let mut chrome_opts = HashMap::new();

        let args = build_launch_arguments(config);
        chrome_opts.insert("args".to_string(), json!(args));
        caps.insert("goog:chromeOptions".to_string(), json!(chrome_opts));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await?;

        Ok(Self {
            client,
            config: config.clone(),
            behavioral_engine: BehavioralEngine::new(),
        })
    }

    /// Open a page on this session.
    ///
    /// The returned [`SaflixPage`] has not navigated anywhere yet; stealth
    /// scripts are applied by its `goto`.
    pub fn new_page(&self) -> SaflixPage {
        SaflixPage::new(
            self.client.clone(),
            self.config.stealth.clone(),
            self.behavioral_engine.clone(),
        )
    }

    /// Close the underlying browser session.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}
