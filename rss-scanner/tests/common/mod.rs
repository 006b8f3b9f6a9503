#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use interfaces::defs::{
    FeedSource, MailDelivery, OutgoingMail, PublishedTime, RawEntry, ServiceError, TextGenerator,
};
use rss_scanner::dates::to_parts;
use rss_scanner::{Config, NormalizedArticle, ScoredArticle};
use std::collections::HashMap;
use std::sync::{Mutex, Once};
use url::Url;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Fixed "now" used across tests: Monday 2025-01-06 12:00:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 12, 0, 0).unwrap()
}

pub fn config_from(pairs: &[(&str, &str)]) -> rss_scanner::Result<Config> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

/// Minimal valid config with the given feeds and no mail.
pub fn test_config(feeds: &[&str]) -> Config {
    let mut config = config_from(&[("GEMINI_API_KEY", "test-key")]).unwrap();
    config.feeds = feeds.iter().map(|f| Url::parse(f).unwrap()).collect();
    config
}

pub fn entry_published_hours_ago(title: &str, hours: i64) -> RawEntry {
    let published = test_now() - Duration::hours(hours);
    RawEntry {
        title: Some(title.to_string()),
        summary: Some(format!("<p>{} summary</p>", title)),
        content: Vec::new(),
        link: Some(format!("https://example.com/{}", title.to_lowercase().replace(' ', "-"))),
        published: PublishedTime::Parts(to_parts(&published)),
    }
}

pub fn scored(title: &str, score: u8) -> ScoredArticle {
    ScoredArticle {
        article: NormalizedArticle {
            title: title.to_string(),
            snippet: format!("{} snippet", title),
            link: format!("https://example.com/{}", title),
            published_at: None,
        },
        relevance_score: score,
        summary: if score > 7 { format!("{} summary", title) } else { "N/A".to_string() },
        source: Url::parse("https://feeds.example.com/rss").unwrap(),
    }
}

/// Feed source answering from a fixed table. Unknown URLs fail with a transport error.
#[derive(Default)]
pub struct StaticFeedSource {
    feeds: HashMap<String, Result<Vec<RawEntry>, ServiceError>>,
    pub requested: Mutex<Vec<String>>,
}

impl StaticFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, url: &str, entries: Vec<RawEntry>) -> Self {
        self.feeds.insert(Url::parse(url).unwrap().to_string(), Ok(entries));
        self
    }

    pub fn with_error(mut self, url: &str, error: ServiceError) -> Self {
        self.feeds.insert(Url::parse(url).unwrap().to_string(), Err(error));
        self
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch_entries(&self, url: &Url) -> Result<Vec<RawEntry>, ServiceError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.feeds
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| Err(ServiceError::Transport(format!("no route to {}", url))))
    }
}

/// Text generator that replies based on the article title found in the prompt.
pub struct ScriptedGenerator {
    replies: Vec<(String, Result<String, ServiceError>)>,
    default_reply: Result<String, ServiceError>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn always(reply: &str) -> Self {
        Self {
            replies: Vec::new(),
            default_reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ServiceError) -> Self {
        Self {
            replies: Vec::new(),
            default_reply: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn on_title(mut self, title: &str, reply: &str) -> Self {
        self.replies.push((format!("Title: {}\n", title), Ok(reply.to_string())));
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn generator_name(&self) -> String {
        "scripted".to_string()
    }

    async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_reply.clone())
    }
}

/// Mailer that records submissions, optionally failing each one.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub fail_with: Option<ServiceError>,
}

impl RecordingMailer {
    pub fn failing(error: ServiceError) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailDelivery for RecordingMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), ServiceError> {
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
