use crate::types::NormalizedArticle;
use interfaces::defs::TextGenerator;
use tracing::{debug, error, warn};

pub const RELEVANCE_LABEL: &str = "RELEVANCE:";
pub const SUMMARY_LABEL: &str = "SUMMARY:";
pub const NOT_APPLICABLE: &str = "N/A";
pub const MAX_RELEVANCE: u8 = 10;

const INSTRUCTION: &str = "You are a DX Manager at a Japanese food manufacturing company. \
Rate this news item on a scale of 1-10 for relevance to factory automation, AppSheet and \
low-code app development, or operational efficiency. \
If relevance is > 7, write a one-sentence summary in Japanese and English.

Format your response as:
RELEVANCE: [number 1-10]
SUMMARY: [if relevance > 7, provide one sentence in Japanese and English, otherwise \"N/A\"]";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Scoring {
    pub relevance: u8,
    pub summary: String,
}

pub fn build_prompt(title: &str, snippet: &str) -> String {
    format!("{}\n\nTitle: {}\n\nSnippet: {}", INSTRUCTION, title, snippet)
}

/// Pull the labelled score and summary lines out of a free-text reply.
///
/// Later labelled lines win. An unparseable or out-of-range score is 0.
pub fn parse_reply(reply: &str) -> Scoring {
    let mut scoring = Scoring::default();

    for line in reply.lines().map(str::trim_start) {
        if let Some(value) = line.strip_prefix(RELEVANCE_LABEL) {
            scoring.relevance = value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|score| *score <= MAX_RELEVANCE)
                .unwrap_or(0);
        } else if let Some(value) = line.strip_prefix(SUMMARY_LABEL) {
            scoring.summary = value.trim().to_string();
        }
    }

    scoring
}

pub struct RelevanceScorer<'a> {
    generator: &'a dyn TextGenerator,
}

impl<'a> RelevanceScorer<'a> {
    pub fn new(generator: &'a dyn TextGenerator) -> Self {
        Self { generator }
    }

    /// One call per article. Failures score 0 with an empty summary.
    pub async fn score(&self, article: &NormalizedArticle) -> Scoring {
        let prompt = build_prompt(&article.title, &article.snippet);

        match self.generator.generate(&prompt).await {
            Ok(reply) => {
                let scoring = parse_reply(&reply);
                debug!("{} scored {:?}: {}", self.generator.generator_name(), article.title, scoring.relevance);
                scoring
            }
            Err(e) if e.is_auth() => {
                error!(
                    "Authentication with {} failed, check the API key: {}",
                    self.generator.generator_name(),
                    e
                );
                Scoring::default()
            }
            Err(e) => {
                warn!("Error calling {}: {}", self.generator.generator_name(), e);
                Scoring::default()
            }
        }
    }
}
