use serde::{Deserialize, Serialize};

/// Thumbnail used when a card carries no usable image.
pub const PLACEHOLDER_THUMBNAIL: &str = "https://via.placeholder.com/300x450?text=SAFLIX";

/// Title used when a page carries no recognisable heading. Listing items
/// that would end up with this title are dropped instead; stream descriptors
/// keep it.
pub const DEFAULT_TITLE: &str = "Unknown Title";

/// One discoverable video entry on a listing or search page.
///
/// Lives for a single response. `id` is minted fresh every time and is NOT
/// stable across requests — it exists so the front end can key DOM nodes,
/// nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingItem {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The result of resolving a detail page down to a single playable URL.
///
/// `stream_url == None` means "no playable source found" and is a successful
/// outcome; the front end falls back to the page URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamDescriptor {
    #[serde(rename = "streamUrl")]
    pub stream_url: Option<String>,
    pub title: String,
    #[serde(rename = "pageUrl")]
    pub page_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_descriptor_serialises_camel_case() {
        let d = StreamDescriptor {
            stream_url: Some("https://cdn.example/v.m3u8".into()),
            title: "A Film".into(),
            page_url: "https://site.example/a-film".into(),
        };
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["streamUrl"], "https://cdn.example/v.m3u8");
        assert_eq!(v["pageUrl"], "https://site.example/a-film");
    }

    #[test]
    fn listing_item_serialises_type_tag() {
        let item = ListingItem {
            id: "abc".into(),
            title: "A Film".into(),
            url: "https://site.example/a-film".into(),
            thumbnail: PLACEHOLDER_THUMBNAIL.into(),
            kind: "movie".into(),
        };
        let v = serde_json::to_value(&item).unwrap();
        assert_eq!(v["type"], "movie");
    }
}
