//! Read-only extraction over captured page HTML.
//!
//! These functions never touch the browser: they take the rendered source a
//! session captured and run the selector rules over it. Keeping them pure
//! means the whole extraction contract is testable against HTML fixtures
//! without a WebDriver in sight.

use scraper::{Html, Selector};
use url::Url;
use uuid::Uuid;

use crate::models::{ListingItem, StreamDescriptor, DEFAULT_TITLE, PLACEHOLDER_THUMBNAIL};
use crate::rules::{ListingRule, StreamRule};

/// Harvest listing items from a home or search page.
///
/// Cards are truncated from the front at the rule's cap before field
/// extraction. A card without a usable title or link is dropped — the
/// contract is "every returned item has a title and a link", not "every DOM
/// element found".
pub fn listing_items(html: &str, base: &Url, rule: &ListingRule) -> Vec<ListingItem> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse(rule.cards).unwrap();
    let link_sel = Selector::parse(rule.link).unwrap();
    let title_sel = Selector::parse(rule.title).unwrap();
    let image_sel = Selector::parse(rule.image).unwrap();

    let mut items = Vec::new();
    for card in document.select(&card_sel).take(rule.max_items) {
        let title = match card.select(&title_sel).next() {
            Some(el) => el.text().collect::<Vec<_>>().join(" ").trim().to_string(),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        let href = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"));
        let url = match href.and_then(|h| absolutize(base, h)) {
            Some(u) => u,
            None => continue,
        };

        let thumbnail = card
            .select(&image_sel)
            .next()
            .and_then(|img| {
                rule.thumbnail_attrs
                    .iter()
                    .find_map(|attr| img.value().attr(attr))
                    .filter(|v| !v.trim().is_empty())
                    .and_then(|v| absolutize(base, v))
            })
            .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string());

        items.push(ListingItem {
            id: Uuid::new_v4().simple().to_string(),
            title,
            url,
            thumbnail,
            kind: "movie".to_string(),
        });
    }
    items
}

/// Resolve a detail page down to a single playable URL.
///
/// The candidate order in the rule is a priority chain: for each selector,
/// the first matching element's `src` is taken if non-empty, otherwise the
/// chain moves on. Exhausting the chain yields `None`, which is a valid
/// result — the page simply has no recognisable embed.
pub fn stream_descriptor(html: &str, page_url: &Url, rule: &StreamRule) -> StreamDescriptor {
    let document = Html::parse_document(html);

    let mut stream_url = None;
    for source in rule.sources {
        let sel = Selector::parse(source).unwrap();
        let candidate = document
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .filter(|src| !src.trim().is_empty())
            .and_then(|src| absolutize(page_url, src));
        if candidate.is_some() {
            stream_url = candidate;
            break;
        }
    }

    let title_sel = Selector::parse(rule.title).unwrap();
    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    StreamDescriptor {
        stream_url,
        title,
        page_url: page_url.to_string(),
    }
}

/// Mirror of the DOM's href/src resolution: absolute values pass through,
/// anything else is joined against the page URL.
fn absolutize(base: &Url, raw: &str) -> Option<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else {
        base.join(raw).ok().map(|u| u.to_string())
    }
}
