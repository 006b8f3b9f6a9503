use anyhow::Context;
use email_delivery::SmtpMailer;
use rss_scanner::{Config, DigestReporter, Fetcher, GeminiClient, RssFeedSource, ScanOrchestrator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("{}", "=".repeat(60));
    info!("Chikuya DX AI Scanner - Starting scan...");
    info!("{}", "=".repeat(60));

    let config = Config::load().context("Failed to load configuration")?;
    info!(
        "Scanning {} feeds, lookback {}, threshold > {}",
        config.feeds.len(),
        config.lookback,
        config.relevance_threshold
    );
    if !config.delivery_enabled() {
        warn!("Email credentials not set. Results will be logged only.");
    }

    let source = RssFeedSource::new(Fetcher::new(config.fetch.clone())?);
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.gemini_model.clone());

    let report = ScanOrchestrator::new(&config, &source, &gemini).scan().await;
    let digest = report.into_digest();
    info!("Found {} relevant articles", digest.len());

    let mailer = config
        .mail
        .as_ref()
        .map(|mail| (SmtpMailer::with_config(mail.mailer_config()), mail));

    let mut reporter = DigestReporter::new(config.lookback);
    if let Some((mailer, mail)) = &mailer {
        reporter = reporter.with_delivery(mailer, mail.username.clone(), mail.recipient.clone());
    }

    reporter.report(&digest).await?;

    info!("Scan complete!");
    Ok(())
}
