use crate::saflix_browser::{behavioral::BehavioralEngine, stealth::scripts_for_level};
use anyhow::Result;
use fantoccini::Client;
use saflix_common::StealthLevel;
use tracing::debug;

/// Page handle over an open browser session.
///
/// Navigation applies the stealth scripts for the session's level; after
/// that the page is read-only — the extractor only ever pulls the rendered
/// source and the resolved URL out of it.
pub struct SaflixPage {
    pub(crate) client: Client,
    stealth: StealthLevel,
    behavioral_engine: BehavioralEngine,
}

impl SaflixPage {
    /// Construct a page wrapper around an existing WebDriver client.
    pub fn new(client: Client, stealth: StealthLevel, behavioral_engine: BehavioralEngine) -> Self {
        Self {
            client,
            stealth,
            behavioral_engine,
        }
    }

    /// Navigate to `url` and apply the stealth scripts.
    ///
    /// WebDriver's page-load wait stands in for the "network mostly idle"
    /// condition; the caller bounds the whole call with its own timeout.
    pub async fn goto(&mut self, url: &str) -> Result<()> {
        self.behavioral_engine.random_delay(300, 1200).await;
        self.client.goto(url).await?;
        self.apply_stealth().await?;
        Ok(())
    }

    async fn apply_stealth(&mut self) -> Result<()> {
        for script in scripts_for_level(&self.stealth) {
            self.client.execute(script, vec![]).await?;
        }
        debug!(target: "browser.stealth", level = ?self.stealth, "evasions applied");
        Ok(())
    }

    /// Return the full rendered page HTML.
    pub async fn get_content(&self) -> Result<String> {
        self.client.source().await.map_err(anyhow::Error::from)
    }

    /// Return the current page URL, after any redirects.
    pub async fn get_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|url| url.to_string())
            .map_err(anyhow::Error::from)
    }
}
