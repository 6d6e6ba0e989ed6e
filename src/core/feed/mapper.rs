use super::types::{Channel, Entry, Feed, Item};

/// Longest snippet, in bytes, copied from an item description.
pub const SNIPPET_MAX_BYTES: usize = 119;

pub fn build_feed(feed_url: &str, channel: &Channel) -> Feed {
    Feed {
        feed_url: feed_url.to_string(),
        title: channel.title.clone(),
        link: channel.link.clone(),
        description: channel.description.clone(),
        author: String::new(),
        entries: channel.items.iter().map(entry_from_item).collect(),
    }
}

fn entry_from_item(item: &Item) -> Entry {
    Entry {
        title: item.title.clone(),
        link: item.link.clone(),
        snippet: truncate_snippet(&item.description),
    }
}

/// Keeps the first [`SNIPPET_MAX_BYTES`] bytes of `description`.
///
/// The cut ignores character boundaries. Each kept byte of a character split
/// by the cut comes out as its own U+FFFD, since the JSON output has to stay
/// valid UTF-8.
pub fn truncate_snippet(description: &str) -> String {
    if description.len() <= SNIPPET_MAX_BYTES {
        return description.to_string();
    }
    let mut boundary = SNIPPET_MAX_BYTES;
    while !description.is_char_boundary(boundary) {
        boundary -= 1;
    }
    let mut snippet = String::with_capacity(SNIPPET_MAX_BYTES + 6);
    snippet.push_str(&description[..boundary]);
    for _ in boundary..SNIPPET_MAX_BYTES {
        snippet.push(char::REPLACEMENT_CHARACTER);
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str) -> Item {
        Item {
            title: title.to_string(),
            link: format!("http://example.com/{title}"),
            description: description.to_string(),
        }
    }

    #[test]
    fn short_description_is_kept_verbatim() {
        let description = "<p>short & sweet</p>";
        assert_eq!(truncate_snippet(description), description);

        let exact = "b".repeat(SNIPPET_MAX_BYTES);
        assert_eq!(truncate_snippet(&exact), exact);
    }

    #[test]
    fn long_description_is_cut_without_suffix() {
        let snippet = truncate_snippet(&"a".repeat(130));
        assert_eq!(snippet, "a".repeat(119));
    }

    #[test]
    fn cut_can_split_html_markup() {
        let description = format!("{}<a href=\"x\">link</a>", "z".repeat(115));
        assert_eq!(truncate_snippet(&description), format!("{}<a h", "z".repeat(115)));
    }

    #[test]
    fn split_multibyte_character_becomes_replacement_char() {
        // 118 ASCII bytes then a 3-byte character: the cut keeps one byte of it.
        let description = format!("{}€tail", "x".repeat(118));
        let snippet = truncate_snippet(&description);

        assert_eq!(snippet, format!("{}\u{FFFD}", "x".repeat(118)));
    }

    #[test]
    fn every_kept_byte_of_a_split_character_is_replaced() {
        // 117 ASCII bytes then a 3-byte character: two of its bytes survive.
        let description = format!("{}€tail", "x".repeat(117));
        let snippet = truncate_snippet(&description);

        assert_eq!(snippet, format!("{}\u{FFFD}\u{FFFD}", "x".repeat(117)));

        // A 4-byte character cut after its third byte.
        let description = format!("{}🦀", "y".repeat(116));
        assert_eq!(
            truncate_snippet(&description),
            format!("{}\u{FFFD}\u{FFFD}\u{FFFD}", "y".repeat(116))
        );
    }

    #[test]
    fn build_feed_preserves_order_and_count() {
        let channel = Channel {
            title: "Example".to_string(),
            link: "http://example.com".to_string(),
            description: "Example feed".to_string(),
            items: vec![item("one", "1"), item("two", "2"), item("three", "3")],
        };
        let feed = build_feed("http://feeds.example.com/rss", &channel);

        assert_eq!(feed.feed_url, "http://feeds.example.com/rss");
        assert_eq!(feed.author, "");
        let titles: Vec<&str> = feed.entries.iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
        assert_eq!(feed.entries[1].link, "http://example.com/two");
    }

    #[test]
    fn sample_feed_serializes_to_expected_json() {
        let channel = Channel {
            title: "Example".to_string(),
            link: "http://example.com".to_string(),
            description: "Example feed".to_string(),
            items: vec![Item {
                title: "Post".to_string(),
                link: "http://example.com/post".to_string(),
                description: "a".repeat(130),
            }],
        };
        let feed = build_feed("http://css-tricks.com/feed", &channel);
        let json = serde_json::to_string(&feed).expect("feed must serialize");

        let expected = format!(
            "{{\"feedUrl\":\"http://css-tricks.com/feed\",\"title\":\"Example\",\"link\":\"http://example.com\",\"description\":\"Example feed\",\"author\":\"\",\"entries\":[{{\"title\":\"Post\",\"link\":\"http://example.com/post\",\"contentSnippet\":\"{}\"}}]}}",
            "a".repeat(119)
        );
        assert_eq!(json, expected);
    }

    #[test]
    fn zero_valued_channel_still_carries_feed_url() {
        let feed = build_feed("http://css-tricks.com/feed", &Channel::default());

        assert_eq!(feed.feed_url, "http://css-tricks.com/feed");
        assert!(feed.title.is_empty());
        assert!(feed.entries.is_empty());
    }
}
