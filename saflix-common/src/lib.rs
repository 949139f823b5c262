//! Common types shared across Saflix crates.
//!
//! This crate defines the browser session configuration, the shared error
//! type, and observability helpers used throughout the Saflix workspace. It
//! is intentionally lightweight so that all crates can depend on it without
//! introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`BrowserConfig`]: Immutable session-manager configuration
//! - [`StealthLevel`]: How aggressively automation signals are masked
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`SaflixError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! Constructing a default configuration:
//!
//! ```rust
//! use saflix_common::{BrowserConfig, StealthLevel};
//!
//! let mut cfg = BrowserConfig::default();
//! cfg.stealth = StealthLevel::Maximum;
//! assert_eq!(cfg.navigation_timeout_secs, 30);
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// User-agent string every page is navigated with. The target site serves
/// the mobile markup the selector rules assume, so this is fixed rather than
/// rotated per session.
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 15_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/15.0 Mobile/15E148 Safari/604.1";

/// Configuration for one browser session.
///
/// Passed into the session manager at construction; never mutated per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// WebDriver endpoint the driver connects to (Chromedriver by default).
    pub webdriver_url: String,
    /// Whether to run the browser without a visible window.
    pub headless: bool,
    /// How aggressively automation signals are masked.
    pub stealth: StealthLevel,
    /// User-agent applied to every page before navigation.
    pub user_agent: String,
    /// Fixed window size, width by height.
    pub viewport: (u32, u32),
    /// Upper bound on page navigation. Launch and DOM reads carry no bound of
    /// their own.
    pub navigation_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            stealth: StealthLevel::Balanced,
            user_agent: MOBILE_USER_AGENT.to_string(),
            viewport: (390, 844),
            navigation_timeout_secs: 30,
        }
    }
}

/// Browser automation stealth level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StealthLevel {
    Lightweight,
    Balanced,
    Maximum,
}

/// Error types used across the Saflix system.
///
/// Everything collapses to a bare message at the HTTP boundary; the variants
/// exist so the scraping path can log which stage failed.
#[derive(thiserror::Error, Debug)]
pub enum SaflixError {
    /// The request was malformed before any browser work began.
    #[error("{0}")]
    InvalidRequest(String),

    /// The browser session could not be started, or the driver reported an
    /// error mid-flight.
    #[error("Browser error: {0}")]
    Driver(#[from] anyhow::Error),

    /// The target page did not become ready within the configured bound.
    #[error("Navigation timed out after {0}s")]
    NavigationTimeout(u64),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenient alias for results that use [`SaflixError`].
pub type Result<T> = std::result::Result<T, SaflixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_request_renders_bare_message() {
        let err = SaflixError::InvalidRequest("Query parameter required".into());
        assert_eq!(err.to_string(), "Query parameter required");
    }

    #[test]
    fn default_config_matches_target_site_assumptions() {
        let cfg = BrowserConfig::default();
        assert!(cfg.user_agent.contains("iPhone"));
        assert_eq!(cfg.navigation_timeout_secs, 30);
        assert!(cfg.headless);
    }
}
