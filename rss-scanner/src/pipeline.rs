use crate::config::Config;
use crate::dates;
use crate::digest::Digest;
use crate::extract::extract;
use crate::recency::is_recent;
use crate::scorer::RelevanceScorer;
use crate::types::ScoredArticle;
use chrono::{DateTime, Utc};
use interfaces::defs::{FeedSource, ServiceError, TextGenerator};
use tracing::{debug, error, info};
use url::Url;

#[derive(Debug, Clone)]
pub struct FeedFailure {
    pub feed: Url,
    pub error: ServiceError,
}

/// Everything one scan produced.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Every recent article that was scored, in scan order.
    pub articles: Vec<ScoredArticle>,
    pub feed_errors: Vec<FeedFailure>,
    pub entries_examined: usize,
    pub threshold: u8,
}

impl ScanReport {
    fn new(threshold: u8) -> Self {
        Self {
            articles: Vec::new(),
            feed_errors: Vec::new(),
            entries_examined: 0,
            threshold,
        }
    }

    pub fn qualifying(&self) -> impl Iterator<Item = &ScoredArticle> {
        self.articles.iter().filter(move |a| a.qualifies(self.threshold))
    }

    pub fn into_digest(self) -> Digest {
        Digest::select(self.articles, self.threshold)
    }
}

/// Walks every configured feed one entry at a time.
pub struct ScanOrchestrator<'a> {
    config: &'a Config,
    feeds: &'a dyn FeedSource,
    scorer: RelevanceScorer<'a>,
}

impl<'a> ScanOrchestrator<'a> {
    pub fn new(config: &'a Config, feeds: &'a dyn FeedSource, generator: &'a dyn TextGenerator) -> Self {
        Self {
            config,
            feeds,
            scorer: RelevanceScorer::new(generator),
        }
    }

    pub async fn scan(&self) -> ScanReport {
        self.scan_at(Utc::now()).await
    }

    /// Scan with `now` as the reference instant for the recency filter.
    pub async fn scan_at(&self, now: DateTime<Utc>) -> ScanReport {
        let mut report = ScanReport::new(self.config.relevance_threshold);

        for feed_url in &self.config.feeds {
            info!("Scanning feed: {}", feed_url);

            let entries = match self.feeds.fetch_entries(feed_url).await {
                Ok(entries) => entries,
                Err(e) => {
                    error!("Error processing feed {}: {}", feed_url, e);
                    report.feed_errors.push(FeedFailure {
                        feed: feed_url.clone(),
                        error: e,
                    });
                    continue;
                }
            };

            let mut recent = 0usize;
            for entry in &entries {
                report.entries_examined += 1;

                let published_at = dates::normalize(&entry.published);
                if !is_recent(published_at, self.config.lookback, now) {
                    continue;
                }
                recent += 1;

                let article = extract(entry, published_at);
                info!("  Processing: {}...", preview(&article.title, 50));

                let scoring = self.scorer.score(&article).await;
                let scored = ScoredArticle {
                    article,
                    relevance_score: scoring.relevance,
                    summary: scoring.summary,
                    source: feed_url.clone(),
                };

                if scored.qualifies(self.config.relevance_threshold) {
                    info!("    ✓ Relevant (score: {})", scored.relevance_score);
                } else {
                    debug!("    score {} below threshold", scored.relevance_score);
                }
                report.articles.push(scored);
            }

            info!(
                "Examined {} entries from {} ({} within the last {})",
                entries.len(),
                feed_url,
                recent,
                self.config.lookback
            );
        }

        info!(
            "Scan finished: {} entries examined, {} scored, {} feeds failed",
            report.entries_examined,
            report.articles.len(),
            report.feed_errors.len()
        );
        report
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
