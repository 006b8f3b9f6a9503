use crate::gemini::DEFAULT_GEMINI_MODEL;
use crate::recency::LookbackWindow;
use crate::types::{FetchConfig, Result, ScannerError};
use email_delivery::smtp_mailer::{SmtpMailerConfig, DEFAULT_SMTP_SERVER, DEFAULT_SUBMISSION_PORT};
use std::env;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Feeds scanned on every run.
pub const DEFAULT_FEEDS: [&str; 3] = [
    "https://workspaceupdates.googleblog.com/feeds/posts/default",
    "https://cloudblog.withgoogle.com/products/ai-machine-learning/rss/",
    "https://news.mit.edu/rss/topic/artificial-intelligence",
];

pub const DEFAULT_RELEVANCE_THRESHOLD: u8 = 7;

#[derive(Clone)]
pub struct MailSettings {
    pub username: String,
    pub password: String,
    pub recipient: String,
    pub smtp_server: String,
    pub smtp_port: u16,
}

impl MailSettings {
    pub fn mailer_config(&self) -> SmtpMailerConfig {
        SmtpMailerConfig {
            server: self.smtp_server.clone(),
            port: self.smtp_port,
            username: self.username.clone(),
            password: self.password.clone(),
            use_starttls: true,
        }
    }
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("username", &self.username)
            .field("password", &"***")
            .field("recipient", &self.recipient)
            .field("smtp_server", &self.smtp_server)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub feeds: Vec<Url>,
    pub lookback: LookbackWindow,
    /// Articles must score strictly above this to enter the digest.
    pub relevance_threshold: u8,
    /// `None` when mail credentials are unset; the digest is then only logged.
    pub mail: Option<MailSettings>,
    pub fetch: FetchConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let gemini_api_key = get("GEMINI_API_KEY").ok_or_else(|| {
            ScannerError::Config("GEMINI_API_KEY environment variable is not set".to_string())
        })?;
        let gemini_model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let lookback_hours: u32 = parse_or("LOOKBACK_HOURS", get("LOOKBACK_HOURS"), LookbackWindow::DAILY.hours())?;
        if lookback_hours == 0 {
            return Err(ScannerError::Config("LOOKBACK_HOURS must be at least 1".to_string()));
        }

        let relevance_threshold: u8 =
            parse_or("RELEVANCE_THRESHOLD", get("RELEVANCE_THRESHOLD"), DEFAULT_RELEVANCE_THRESHOLD)?;
        if relevance_threshold > 10 {
            return Err(ScannerError::Config(format!(
                "RELEVANCE_THRESHOLD must be between 0 and 10, got {}",
                relevance_threshold
            )));
        }

        let mail = match (get("EMAIL_USER"), get("EMAIL_PASSWORD")) {
            (Some(username), Some(password)) => Some(MailSettings {
                recipient: get("EMAIL_TO").unwrap_or_else(|| username.clone()),
                smtp_server: get("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
                smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), DEFAULT_SUBMISSION_PORT)?,
                username,
                password,
            }),
            _ => None,
        };

        let feeds = DEFAULT_FEEDS
            .iter()
            .map(|feed| Url::parse(feed))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Config {
            gemini_api_key,
            gemini_model,
            feeds,
            lookback: LookbackWindow::from_hours(lookback_hours),
            relevance_threshold,
            mail,
            fetch: FetchConfig::default(),
        })
    }

    pub fn delivery_enabled(&self) -> bool {
        self.mail.is_some()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &"***")
            .field("gemini_model", &self.gemini_model)
            .field("feeds", &self.feeds)
            .field("lookback", &self.lookback)
            .field("relevance_threshold", &self.relevance_threshold)
            .field("mail", &self.mail)
            .field("fetch", &self.fetch)
            .finish()
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| ScannerError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
