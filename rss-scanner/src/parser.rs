use crate::dates;
use crate::types::{Result, ScannerError};
use feed_rs::parser;
use interfaces::defs::{PublishedTime, RawEntry};
use tracing::{debug, info};

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

pub struct FeedParser;

impl FeedParser {
    /// Parse an RSS or Atom document into raw entries.
    ///
    /// Date strings inside the feed are read by [`dates::feed_timestamp`].
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::Builder::new()
            .timestamp_parser(dates::feed_timestamp)
            .build()
            .parse(content.as_bytes())
            .map_err(|e| ScannerError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::raw_entry).collect();

        info!("Parsed feed {:?} with {} entries", title.as_deref().unwrap_or("untitled"), entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn raw_entry(entry: feed_rs::model::Entry) -> RawEntry {
        let published = entry
            .published
            .map(|dt| PublishedTime::Parts(dates::to_parts(&dt)))
            .unwrap_or_default();

        RawEntry {
            title: entry.title.map(|t| t.content),
            summary: entry.summary.map(|s| s.content),
            content: entry.content.and_then(|c| c.body).into_iter().collect(),
            link: entry.links.into_iter().next().map(|l| l.href),
            published,
        }
    }
}
