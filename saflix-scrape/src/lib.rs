//! Page acquisition and extraction for the Saflix backend.
//!
//! - Session traits and the Fantoccini-backed implementation (`browser`)
//! - Selector rule tables tuned against the target site (`rules`)
//! - Pure DOM extraction over captured HTML (`extract`)
//! - The three catalog operations: home, search, stream (`catalog`)
//!
//! The selector rules are a best-effort snapshot of one site's mobile markup;
//! they carry no contract from the site and silently thin out when the markup
//! drifts. `catalog` logs a drift warning when an extraction comes back empty.

pub mod browser;
pub mod catalog;
pub mod extract;
pub mod models;
pub mod rules;
