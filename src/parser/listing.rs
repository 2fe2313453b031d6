use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::error::ParseError;

static THUMBNAILS: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".thumbnails").unwrap());
static INSCRIPTION_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"a[href^="/inscription/"]"#).unwrap());

/// Inscription ids linked from a listing page's thumbnail grid, in display order.
pub fn inscription_ids(html: &str) -> Result<Vec<String>, ParseError> {
    let document = Html::parse_document(html);
    let grid = document
        .select(&THUMBNAILS)
        .next()
        .ok_or(ParseError::MissingElement("inscription thumbnails"))?;

    Ok(grid
        .select(&INSCRIPTION_LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.strip_prefix("/inscription/"))
        .map(|id| id.trim_end_matches('/').to_string())
        .filter(|id| !id.is_empty())
        .collect())
}
