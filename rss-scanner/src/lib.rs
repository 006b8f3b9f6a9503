pub mod config;
pub mod dates;
pub mod digest;
pub mod extract;
pub mod fetcher;
pub mod gemini;
pub mod parser;
pub mod pipeline;
pub mod recency;
pub mod scorer;
pub mod sources;
pub mod types;

pub use config::Config;
pub use digest::{Digest, DigestReporter, ReportCadence, ReportOutcome, SkipReason};
pub use fetcher::Fetcher;
pub use gemini::GeminiClient;
pub use parser::FeedParser;
pub use pipeline::{ScanOrchestrator, ScanReport};
pub use recency::LookbackWindow;
pub use scorer::RelevanceScorer;
pub use sources::RssFeedSource;
pub use types::*;
