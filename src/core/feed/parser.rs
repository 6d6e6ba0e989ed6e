use roxmltree::Node;

use super::types::{Channel, Item, Rss};

#[derive(Debug, thiserror::Error)]
pub enum FeedParseError {
    #[error("feed payload is empty")]
    EmptyPayload,
    #[error("feed payload is not valid utf-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("unsupported xml encoding `{0}`, only utf-8 is read")]
    UnsupportedEncoding(String),
    #[error("xml feed parse error: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Decodes an RSS 2.0 payload into its `channel/item` shape.
///
/// Elements are matched on their local name, so a namespaced `<atom:link>`
/// counts as a `link`. Repeated scalar elements overwrite earlier ones, items
/// accumulate in document order.
pub fn parse_rss_bytes(raw: &[u8]) -> Result<Rss, FeedParseError> {
    let trimmed = trim_leading_ascii_whitespace(raw);
    if trimmed.is_empty() {
        return Err(FeedParseError::EmptyPayload);
    }
    let text = std::str::from_utf8(trimmed)?;
    if let Some(encoding) = declared_encoding(text) {
        if !encoding.eq_ignore_ascii_case("utf-8") {
            return Err(FeedParseError::UnsupportedEncoding(encoding.to_string()));
        }
    }
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(text, options)?;

    let mut rss = Rss::default();
    for node in doc
        .root_element()
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == "channel")
    {
        read_channel(node, &mut rss.channel);
    }
    Ok(rss)
}

fn read_channel(node: Node<'_, '_>, channel: &mut Channel) {
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "title" => channel.title = direct_text(child),
            "link" => channel.link = direct_text(child),
            "description" => channel.description = direct_text(child),
            "item" => channel.items.push(read_item(child)),
            _ => {}
        }
    }
}

fn read_item(node: Node<'_, '_>) -> Item {
    let mut item = Item::default();
    for child in node.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "title" => item.title = direct_text(child),
            "link" => item.link = direct_text(child),
            "description" => item.description = direct_text(child),
            _ => {}
        }
    }
    item
}

// Text and CDATA directly under the element; nested elements are skipped.
fn direct_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect()
}

/// `encoding` pseudo-attribute of the `<?xml ...?>` declaration, if any.
fn declared_encoding(text: &str) -> Option<&str> {
    let declaration = text.strip_prefix("<?xml")?;
    let declaration = &declaration[..declaration.find("?>")?];
    let after_key = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let after_eq = after_key.trim_start().strip_prefix('=')?.trim_start();
    let quote = after_eq.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &after_eq[1..];
    value.find(quote).map(|end| &value[..end])
}

fn trim_leading_ascii_whitespace(raw: &[u8]) -> &[u8] {
    let mut index = 0;
    while index < raw.len() && raw[index].is_ascii_whitespace() {
        index += 1;
    }
    &raw[index..]
}
