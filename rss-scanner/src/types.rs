use chrono::NaiveDateTime;
use interfaces::defs::ServiceError;
use url::Url;

/// Plain-text view of one feed entry, ready to be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArticle {
    pub title: String,
    pub snippet: String,
    pub link: String,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredArticle {
    pub article: NormalizedArticle,
    /// 0 when scoring failed or the reply could not be parsed.
    pub relevance_score: u8,
    pub summary: String,
    /// Feed the article came from.
    pub source: Url,
}

impl ScoredArticle {
    pub fn qualifies(&self, threshold: u8) -> bool {
        self.relevance_score > threshold
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "DX-Scanner/1.0".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

#[derive(Debug)]
pub struct FetchResult {
    pub content: String,
    pub http_status: u16,
    pub response_time_ms: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Digest delivery failed: {0}")]
    Delivery(#[source] ServiceError),
}

impl From<ScannerError> for ServiceError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::Parse(msg) => ServiceError::Parse(msg),
            ScannerError::Delivery(inner) => inner,
            other => ServiceError::Transport(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScannerError>;
