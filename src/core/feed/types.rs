use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decoded RSS document. Only the `channel` subtree is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rss {
    pub channel: Channel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub title: String,
    pub link: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feed {
    #[serde(rename = "feedUrl")]
    pub feed_url: String,
    pub title: String,
    pub link: String,
    pub description: String,
    pub author: String,
    /// `null` on the wire when there are no entries.
    #[serde(serialize_with = "entries_or_null", deserialize_with = "entries_from_null")]
    pub entries: Vec<Entry>,
}

fn entries_or_null<S: Serializer>(entries: &[Entry], serializer: S) -> Result<S::Ok, S::Error> {
    if entries.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.collect_seq(entries)
    }
}

fn entries_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Entry>, D::Error> {
    Ok(Option::<Vec<Entry>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entry {
    pub title: String,
    pub link: String,
    #[serde(rename = "contentSnippet")]
    pub snippet: String,
}

/// Error object sent to clients. Zero-valued inside a successful [`Root`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Root {
    pub error: ErrorBody,
    pub feed: Feed,
}

impl Root {
    pub fn from_feed(feed: Feed) -> Self {
        Self {
            error: ErrorBody::default(),
            feed,
        }
    }
}
