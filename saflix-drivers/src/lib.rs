//! Driver layer for browser automation.
//!
//! This crate exposes the browser session wrapper used by the scraping
//! layer to render the target site's pages before extraction.
//!
//! - [`saflix_browser::driver::SaflixDriver`]: WebDriver client wrapper
//! - [`saflix_browser::page::SaflixPage`]: navigation and rendered-DOM reads
//! - [`saflix_browser::behavioral::BehavioralEngine`]: human-like timings
//! - [`saflix_browser::stealth`]: launch arguments and JS evasions
pub mod saflix_browser;
