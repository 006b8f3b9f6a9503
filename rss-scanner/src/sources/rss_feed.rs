use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use async_trait::async_trait;
use interfaces::defs::{FeedSource, RawEntry, ServiceError};
use tracing::{debug, info, warn};
use url::Url;

/// Feed source backed by HTTP and feed-rs.
pub struct RssFeedSource {
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch_entries(&self, url: &Url) -> Result<Vec<RawEntry>, ServiceError> {
        let fetched = self.fetcher.fetch_feed(url).await?;
        debug!("{} answered HTTP {} in {} ms", url, fetched.http_status, fetched.response_time_ms);

        if fetched.content.trim().is_empty() {
            warn!("No content returned for RSS feed {}", url);
            return Ok(Vec::new());
        }

        let parsed = FeedParser::parse_feed(&fetched.content)?;
        info!("Pulled {} entries from RSS feed {}", parsed.entries.len(), url);
        Ok(parsed.entries)
    }
}
