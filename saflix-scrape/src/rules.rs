//! Selector rule tables.
//!
//! Each operation gets one rule value: an ordered set of candidate selectors
//! per field, evaluated first-match-wins. Home and search share the same
//! shape and differ only in the card set and title candidates, so they are
//! two instances of one type rather than two copies of the query code.
//!
//! These selectors are guesses tuned against the target site's mobile markup
//! at one point in time. They carry no semantic guarantee; when the site
//! changes, extraction thins out silently rather than failing.

/// How listing cards are found and fielded on a page.
#[derive(Debug, Clone, Copy)]
pub struct ListingRule {
    /// Combined card selector; matches are taken in document order.
    pub cards: &'static str,
    /// Combined title selector, queried inside a card.
    pub title: &'static str,
    /// Link selector inside a card; the first href wins.
    pub link: &'static str,
    /// Image selector inside a card.
    pub image: &'static str,
    /// Ordered image attributes; the first non-empty value wins.
    pub thumbnail_attrs: &'static [&'static str],
    /// Hard cap on returned items, truncated from the front.
    pub max_items: usize,
}

/// How a detail page resolves to a playable URL.
#[derive(Debug, Clone, Copy)]
pub struct StreamRule {
    /// Ordered source candidates; the `src` of the first selector with a
    /// non-empty match wins. The order is deliberate — sites vary in which
    /// container actually holds the playable source — and must be preserved.
    pub sources: &'static [&'static str],
    /// Combined heading selector for the page title.
    pub title: &'static str,
}

pub const HOME_RULE: ListingRule = ListingRule {
    cards: ".item, .post, article",
    title: ".title, h2, .entry-title",
    link: "a",
    image: "img",
    thumbnail_attrs: &["src", "data-src"],
    max_items: 20,
};

pub const SEARCH_RULE: ListingRule = ListingRule {
    cards: ".item, .post, article, .search-item",
    title: ".title, h2, h3, .entry-title",
    link: "a",
    image: "img",
    thumbnail_attrs: &["src", "data-src"],
    max_items: 20,
};

pub const STREAM_RULE: StreamRule = StreamRule {
    sources: &[
        "video source",
        "iframe",
        "video source, iframe, .video-player, .player iframe, #player iframe, .embed iframe",
    ],
    title: "h1, .video-title, .entry-title",
};
