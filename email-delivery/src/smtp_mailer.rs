use async_trait::async_trait;
use interfaces::defs::{MailDelivery, OutgoingMail, ServiceError};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SUBMISSION_PORT: u16 = 587;

/// SMTP reply codes that mean the server rejected our credentials.
const AUTH_REJECTED_CODES: [u16; 3] = [530, 534, 535];

#[derive(Clone)]
pub struct SmtpMailerConfig {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Upgrade the connection with STARTTLS. Only disable against a local test server.
    pub use_starttls: bool,
}

impl SmtpMailerConfig {
    pub fn gmail(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            server: DEFAULT_SMTP_SERVER.to_string(),
            port: DEFAULT_SUBMISSION_PORT,
            username: username.into(),
            password: password.into(),
            use_starttls: true,
        }
    }
}

// Debug by hand so the password never reaches a log line.
impl std::fmt::Debug for SmtpMailerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailerConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_starttls", &self.use_starttls)
            .finish()
    }
}

pub struct SmtpMailer {
    config: SmtpMailerConfig,
}

impl SmtpMailer {
    pub fn with_config(config: SmtpMailerConfig) -> Self {
        Self { config }
    }

    /// Build the MIME message for an outgoing HTML mail.
    pub fn build_message(mail: &OutgoingMail) -> Result<Message, ServiceError> {
        let from: Mailbox = mail
            .from
            .parse()
            .map_err(|e| ServiceError::Parse(format!("invalid sender address '{}': {}", mail.from, e)))?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| ServiceError::Parse(format!("invalid recipient address '{}': {}", mail.to, e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|e| ServiceError::Parse(format!("failed to build message: {}", e)))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, ServiceError> {
        let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());

        let builder = if self.config.use_starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)
                .map_err(classify_smtp_error)?
        } else {
            warn!("Sending over plaintext SMTP to {}", self.config.server);
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.server)
        };

        Ok(builder.port(self.config.port).credentials(credentials).build())
    }
}

#[async_trait]
impl MailDelivery for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), ServiceError> {
        let message = Self::build_message(mail)?;
        let transport = self.transport()?;

        debug!("Submitting mail via {}:{} as {}", self.config.server, self.config.port, self.config.username);

        let response = transport.send(message).await.map_err(classify_smtp_error)?;
        info!("Mail accepted for {} (code {})", mail.to, response.code());
        Ok(())
    }
}

fn classify_smtp_error(err: lettre::transport::smtp::Error) -> ServiceError {
    let auth_rejected = err
        .status()
        .map(|code| AUTH_REJECTED_CODES.contains(&u16::from(code)))
        .unwrap_or(false);

    if auth_rejected {
        ServiceError::Auth(err.to_string())
    } else {
        ServiceError::Transport(err.to_string())
    }
}
