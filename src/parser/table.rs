use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;

static DL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("dl").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

/// Label/value pairs of the page's first `<dl>`, in document order.
///
/// A `<dd>` holding a link yields the link target (`/block/775796`), anything
/// else yields its text with whitespace collapsed.
pub fn attribute_table(document: &Html) -> Result<Vec<(String, String)>, ParseError> {
    let dl = document
        .select(&DL)
        .next()
        .ok_or(ParseError::MissingElement("attribute table"))?;

    let mut pairs = Vec::new();
    let mut label: Option<String> = None;

    for child in entries(dl)? {
        match child.value().name() {
            "dt" => {
                if let Some(prev) = label.replace(collapsed_text(child)) {
                    return Err(ParseError::MalformedTable(format!("{prev:?} has no value")));
                }
            }
            _ => {
                let key = label
                    .take()
                    .ok_or_else(|| ParseError::MalformedTable("value without a label".into()))?;
                pairs.push((key, cell_value(child)));
            }
        }
    }

    if let Some(dangling) = label {
        return Err(ParseError::MalformedTable(format!("{dangling:?} has no value")));
    }
    Ok(pairs)
}

/// The `<dt>`/`<dd>` elements of `dl` in order. One level of `<div>`
/// grouping is flattened; any other element child is a malformed table.
fn entries(dl: ElementRef<'_>) -> Result<Vec<ElementRef<'_>>, ParseError> {
    let mut out = Vec::new();
    for child in dl.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "dt" | "dd" => out.push(child),
            "div" => {
                for inner in child.children().filter_map(ElementRef::wrap) {
                    match inner.value().name() {
                        "dt" | "dd" => out.push(inner),
                        other => return Err(unexpected(other)),
                    }
                }
            }
            other => return Err(unexpected(other)),
        }
    }
    Ok(out)
}

fn unexpected(name: &str) -> ParseError {
    ParseError::MalformedTable(format!("unexpected <{name}> in table"))
}

/// Text of the first `<h1>`, if any.
pub fn heading(document: &Html) -> Option<String> {
    document
        .select(&H1)
        .next()
        .map(collapsed_text)
        .filter(|t| !t.is_empty())
}

fn cell_value(dd: ElementRef<'_>) -> String {
    dd.select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
        .unwrap_or_else(|| collapsed_text(dd))
}

pub(crate) fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(html: &str) -> Result<Vec<(String, String)>, ParseError> {
        attribute_table(&Html::parse_document(html))
    }

    #[test]
    fn pairs_in_order() {
        let pairs = table(
            "<dl><dt>hash</dt><dd class=monospace>00ab</dd>\
             <dt>previous blockhash</dt><dd><a href=/block/ff class=monospace>ff</a></dd>\
             <dt>timestamp</dt><dd><time>2009-01-09 02:54:25 UTC</time></dd>\
             <dt>rarity</dt><dd><span class=common>common</span></dd></dl>",
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("hash".to_string(), "00ab".to_string()),
                ("previous blockhash".to_string(), "/block/ff".to_string()),
                ("timestamp".to_string(), "2009-01-09 02:54:25 UTC".to_string()),
                ("rarity".to_string(), "common".to_string()),
            ]
        );
    }

    #[test]
    fn only_first_table_is_read() {
        let pairs = table("<dl><dt>a</dt><dd>1</dd></dl><dl><dt>b</dt><dd>2</dd></dl>").unwrap();
        assert_eq!(pairs, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn whitespace_collapsed() {
        let pairs = table("<dl><dt> script\n pubkey </dt><dd>OP_0\n   OP_PUSHBYTES_20  ab</dd></dl>").unwrap();
        assert_eq!(pairs[0], ("script pubkey".to_string(), "OP_0 OP_PUSHBYTES_20 ab".to_string()));
    }

    #[test]
    fn missing_table() {
        assert_eq!(
            table("<p>nothing here</p>").unwrap_err(),
            ParseError::MissingElement("attribute table")
        );
    }

    #[test]
    fn label_without_value() {
        assert!(matches!(
            table("<dl><dt>a</dt><dd>1</dd><dt>b</dt></dl>"),
            Err(ParseError::MalformedTable(_))
        ));
    }

    #[test]
    fn value_without_label() {
        assert_eq!(
            table("<dl><dd>1</dd></dl>").unwrap_err(),
            ParseError::MalformedTable("value without a label".into())
        );
    }

    #[test]
    fn label_followed_by_label() {
        assert_eq!(
            table("<dl><dt>a</dt><dt>b</dt><dd>1</dd></dl>").unwrap_err(),
            ParseError::MalformedTable("\"a\" has no value".into())
        );
    }

    #[test]
    fn div_groups_are_flattened() {
        let pairs = table(
            "<dl><div><dt>hash</dt><dd>1</dd></div>\
             <div><dt>size</dt><dd>215</dd></div><dt>weight</dt><dd>860</dd></dl>",
        )
        .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("hash".to_string(), "1".to_string()),
                ("size".to_string(), "215".to_string()),
                ("weight".to_string(), "860".to_string()),
            ]
        );
    }

    #[test]
    fn foreign_element_in_table() {
        assert_eq!(
            table("<dl><dt>a</dt><dd>1</dd><p>note</p></dl>").unwrap_err(),
            ParseError::MalformedTable("unexpected <p> in table".into())
        );
    }

    #[test]
    fn heading_text() {
        let doc = Html::parse_document("<h1>Inscription   42149</h1>");
        assert_eq!(heading(&doc).as_deref(), Some("Inscription 42149"));
    }
}
