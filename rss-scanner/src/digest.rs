use crate::recency::LookbackWindow;
use crate::types::{Result, ScannerError, ScoredArticle};
use html_escape::{encode_double_quoted_attribute, encode_text};
use interfaces::defs::{MailDelivery, OutgoingMail};
use std::fmt::Write;
use tracing::{error, info};

pub const REPORT_NAME: &str = "Chikuya DX AI Scanner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCadence {
    Daily,
    Weekly,
}

impl ReportCadence {
    pub fn for_window(window: LookbackWindow) -> Self {
        if window.hours() <= LookbackWindow::DAILY.hours() {
            ReportCadence::Daily
        } else {
            ReportCadence::Weekly
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportCadence::Daily => "Daily",
            ReportCadence::Weekly => "Weekly",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            ReportCadence::Daily => "Chikuya DX: Today's AI Updates",
            ReportCadence::Weekly => "Chikuya DX: This Week's AI Updates",
        }
    }
}

/// Qualifying articles of one run, in scan order.
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pub articles: Vec<ScoredArticle>,
    pub total_considered: usize,
}

impl Digest {
    /// Keep the articles scoring strictly above `threshold`.
    pub fn select(scored: Vec<ScoredArticle>, threshold: u8) -> Self {
        let total_considered = scored.len();
        let articles = scored.into_iter().filter(|a| a.qualifies(threshold)).collect();
        Self {
            articles,
            total_considered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}

pub fn render_html(digest: &Digest, cadence: ReportCadence, window: LookbackWindow) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<html>\n<head></head>\n<body>\n\
         <h2>{} - {} Report</h2>\n\
         <p>Found {} relevant AI news items from the last {} ({} articles considered):</p>\n\
         <ul>\n",
        REPORT_NAME,
        cadence.label(),
        digest.len(),
        window,
        digest.total_considered
    );

    for scored in &digest.articles {
        let _ = write!(
            html,
            "<li>\n\
             <strong><a href=\"{}\">{}</a></strong><br>\n\
             <em>Relevance Score: {}/10</em><br>\n\
             {}<br>\n\
             <small>Source: {}</small>\n\
             </li>\n<br>\n",
            encode_double_quoted_attribute(&scored.article.link),
            encode_text(&scored.article.title),
            scored.relevance_score,
            encode_text(&scored.summary),
            encode_text(scored.source.as_str()),
        );
    }

    let _ = write!(
        html,
        "</ul>\n<p>---</p>\n<p><small>This is an automated report from {}</small></p>\n</body>\n</html>\n",
        REPORT_NAME
    );

    html
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NothingToReport,
    DeliveryDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Sent { recipient: String },
    Skipped(SkipReason),
}

struct DeliveryTarget<'a> {
    mailer: &'a dyn MailDelivery,
    sender: String,
    recipient: String,
}

pub struct DigestReporter<'a> {
    window: LookbackWindow,
    cadence: ReportCadence,
    delivery: Option<DeliveryTarget<'a>>,
}

impl<'a> DigestReporter<'a> {
    /// A reporter that only logs. Add a mailer with [`DigestReporter::with_delivery`].
    pub fn new(window: LookbackWindow) -> Self {
        Self {
            window,
            cadence: ReportCadence::for_window(window),
            delivery: None,
        }
    }

    pub fn with_delivery(
        mut self,
        mailer: &'a dyn MailDelivery,
        sender: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        self.delivery = Some(DeliveryTarget {
            mailer,
            sender: sender.into(),
            recipient: recipient.into(),
        });
        self
    }

    pub fn compose(&self, digest: &Digest, sender: &str, recipient: &str) -> OutgoingMail {
        OutgoingMail {
            from: sender.to_string(),
            to: recipient.to_string(),
            subject: self.cadence.subject().to_string(),
            html_body: render_html(digest, self.cadence, self.window),
        }
    }

    /// Write every qualifying article to the log.
    pub fn log_digest(&self, digest: &Digest) {
        info!("{}", "=".repeat(60));
        info!("RELEVANT ARTICLES FOUND:");
        info!("{}", "=".repeat(60));
        for (i, scored) in digest.articles.iter().enumerate() {
            info!("{}. {}", i + 1, scored.article.title);
            info!("   Relevance: {}/10", scored.relevance_score);
            info!("   Summary: {}", scored.summary);
            info!("   Link: {}", scored.article.link);
            info!("   Source: {}", scored.source);
        }
    }

    /// Log the digest and mail it when there is something to send and a mailer is set.
    ///
    /// Only a failed submission is an error.
    pub async fn report(&self, digest: &Digest) -> Result<ReportOutcome> {
        if digest.is_empty() {
            info!("No relevant articles found. Skipping email.");
            return Ok(ReportOutcome::Skipped(SkipReason::NothingToReport));
        }

        self.log_digest(digest);

        let Some(target) = &self.delivery else {
            info!("Email not configured. Skipping email send.");
            return Ok(ReportOutcome::Skipped(SkipReason::DeliveryDisabled));
        };

        let mail = self.compose(digest, &target.sender, &target.recipient);
        match target.mailer.send(&mail).await {
            Ok(()) => {
                info!("Email sent successfully to {}", target.recipient);
                Ok(ReportOutcome::Sent {
                    recipient: target.recipient.clone(),
                })
            }
            Err(e) => {
                error!("Error sending email: {}", e);
                Err(ScannerError::Delivery(e))
            }
        }
    }
}
