pub mod fields;
pub mod listing;
pub mod table;

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::error::Result;
use crate::models::{Block, Inscription, Sat, Tx};
use fields::Record;

static TRAILING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(-?\d+)$").unwrap());

/// Page HTML → attribute table → validated record.
fn parse_record<R: Record>(html: &str) -> Result<R> {
    let document = Html::parse_document(html);
    let pairs = table::attribute_table(&document)?;
    Ok(R::build(pairs)?)
}

pub fn parse_block(html: &str) -> Result<Block> {
    parse_record(html)
}

pub fn parse_sat(html: &str) -> Result<Sat> {
    parse_record(html)
}

pub fn parse_tx(html: &str) -> Result<Tx> {
    parse_record(html)
}

/// The inscription page keeps its title and number in the `<h1>`
/// ("Inscription 42149") rather than in the attribute table.
pub fn parse_inscription(html: &str) -> Result<Inscription> {
    let document = Html::parse_document(html);
    let mut pairs = table::attribute_table(&document)?;

    if let Some(title) = table::heading(&document) {
        let has_number = pairs
            .iter()
            .any(|(k, _)| Inscription::spec(k).is_some_and(|s| s.name == "inscription_number"));
        if !has_number {
            if let Some(caps) = TRAILING_NUMBER_RE.captures(&title) {
                pairs.push(("inscription_number".to_string(), caps[1].to_string()));
            }
        }
        pairs.push(("title".to_string(), title));
    }

    Ok(Inscription::build(pairs)?)
}
