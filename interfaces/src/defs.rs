use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Broken-down calendar time as a feed library hands it over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// Publication time of an entry, in whatever shape the feed supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PublishedTime {
    Parts(TimeParts),
    Text(String),
    #[default]
    Absent,
}

/// One entry as the feed collaborator returns it. Fields are as present in the feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntry {
    pub title: Option<String>,
    /// Summary or description, whichever the feed carried.
    pub summary: Option<String>,
    pub content: Vec<String>,
    pub link: Option<String>,
    pub published: PublishedTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ServiceError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ServiceError::Auth(_))
    }
}

// Object style note:
// Implementations of these traits are called once per unit of work (one feed,
// one article, one digest) inside a short lived process. They should not keep
// state between calls beyond their connection settings.

#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse every entry currently published at `url`.
    async fn fetch_entries(&self, url: &Url) -> Result<Vec<RawEntry>, ServiceError>;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn generator_name(&self) -> String;

    /// Submit one prompt and return the free-text reply.
    async fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait MailDelivery: Send + Sync {
    /// Submit one message. A single attempt, no retry.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), ServiceError>;
}
