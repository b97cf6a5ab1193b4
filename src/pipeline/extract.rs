use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{DlHubError, Result};

static POST_PATH_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(?<kind>video|photo)/(?<id>\d+)").expect("Invalid regex"));

static DATA_ISLAND_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[id="__UNIVERSAL_DATA_FOR_REHYDRATION__"]"#)
        .expect("Invalid selector")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Video,
    Photo,
}

/// Derive the post kind and media id from the *input* URL path. Structural:
/// the same URL always yields the same result.
pub fn extract_post_id(input_url: &str) -> Result<(PostKind, String)> {
    let url = Url::parse(input_url)
        .map_err(|_| DlHubError::UnextractableId(input_url.to_string()))?;

    let captures = POST_PATH_REGEX
        .captures(url.path())
        .ok_or_else(|| DlHubError::UnextractableId(input_url.to_string()))?;

    let kind = match &captures["kind"] {
        "video" => PostKind::Video,
        _ => PostKind::Photo,
    };

    Ok((kind, captures["id"].to_string()))
}

/// Text content of the rehydration data island, if the page carries one.
/// Markup errors are tolerated; absence is not an error.
pub fn locate_data_island(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&DATA_ISLAND_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>())
}
