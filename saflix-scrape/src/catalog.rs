//! The three catalog operations the API dispatches to.
//!
//! Each one is the same single-shot sequence: build the target URL, capture
//! the rendered page through a fresh session, run the extraction rule over
//! the captured HTML. No caching, no retries, no state across calls.

use std::sync::Arc;

use saflix_common::SaflixError;
use tracing::{info, warn};
use url::Url;

use crate::browser::{capture, SessionManager};
use crate::extract::{listing_items, stream_descriptor};
use crate::models::{ListingItem, StreamDescriptor};
use crate::rules::{HOME_RULE, SEARCH_RULE, STREAM_RULE};

pub struct Catalog {
    manager: Arc<dyn SessionManager>,
    site: Url,
    navigation_timeout_secs: u64,
}

impl Catalog {
    pub fn new(manager: Arc<dyn SessionManager>, site: Url, navigation_timeout_secs: u64) -> Self {
        Self {
            manager,
            site,
            navigation_timeout_secs,
        }
    }

    /// Front-page listing: up to 20 cards off the site root.
    pub async fn home(&self) -> saflix_common::Result<Vec<ListingItem>> {
        let page = capture(
            self.manager.as_ref(),
            &self.site,
            self.navigation_timeout_secs,
        )
        .await?;
        let items = listing_items(&page.html, &page.url, &HOME_RULE);
        self.note_listing_outcome("home", &page.url, items.len());
        Ok(items)
    }

    /// Search listing: up to 20 cards off the site's search endpoint.
    ///
    /// The query is URL-encoded before interpolation; nothing else about it
    /// is sanitised.
    pub async fn search(&self, query: &str) -> saflix_common::Result<Vec<ListingItem>> {
        let target = self
            .site
            .join(&format!("?s={}", urlencoding::encode(query)))
            .map_err(|e| SaflixError::Config(format!("bad search target: {e}")))?;
        let page = capture(self.manager.as_ref(), &target, self.navigation_timeout_secs).await?;
        let items = listing_items(&page.html, &page.url, &SEARCH_RULE);
        self.note_listing_outcome("search", &page.url, items.len());
        Ok(items)
    }

    /// Resolve a caller-supplied detail page to a stream descriptor.
    ///
    /// A page with no recognisable embed still resolves successfully, with
    /// `stream_url` empty; "not found" UX belongs to the caller.
    pub async fn stream(&self, url: &str) -> saflix_common::Result<StreamDescriptor> {
        let target = Url::parse(url)
            .map_err(|_| SaflixError::InvalidRequest("URL parameter must be absolute".into()))?;
        let page = capture(self.manager.as_ref(), &target, self.navigation_timeout_secs).await?;
        let descriptor = stream_descriptor(&page.html, &page.url, &STREAM_RULE);
        info!(
            target: "scrape.stream",
            page = %descriptor.page_url,
            found = descriptor.stream_url.is_some(),
            "stream resolution finished"
        );
        Ok(descriptor)
    }

    // Zero extracted items is a success at the interface, but it is also the
    // only signal we get when the site's markup drifts away from the
    // selector rules, so it is logged loudly.
    fn note_listing_outcome(&self, operation: &str, url: &Url, count: usize) {
        if count == 0 {
            warn!(
                target: "scrape.selector",
                operation,
                url = %url,
                "extraction yielded zero items; selectors may have drifted"
            );
        } else {
            info!(target: "scrape.listing", operation, url = %url, count, "listing extracted");
        }
    }
}
