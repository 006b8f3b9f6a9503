use crate::types::{FetchConfig, FetchResult, Result, ScannerError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use url::Url;

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    /// Single GET of the feed document. No retries.
    pub async fn fetch_feed(&self, url: &Url) -> Result<FetchResult> {
        let start_time = Instant::now();
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ScannerError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.config.max_feed_size_mb {
                return Err(ScannerError::FeedTooLarge { size_mb });
            }
        }

        let content = response.text().await?;
        let response_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Successfully fetched feed: {} ({} bytes, {} ms)", url, content.len(), response_time_ms);

        Ok(FetchResult {
            content,
            http_status: status.as_u16(),
            response_time_ms,
        })
    }
}
