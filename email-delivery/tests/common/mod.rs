#![allow(dead_code)]

// Re-export commonly used test types and utilities
pub use email_delivery::{SmtpMailer, SmtpMailerConfig};
pub use interfaces::defs::{MailDelivery, OutgoingMail};

use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .try_init()
            .ok();
    });
}

/// Test configuration constants
pub const TEST_SENDER: &str = "scanner@localhost";
pub const TEST_RECIPIENT: &str = "reader@localhost";

pub fn sample_mail() -> OutgoingMail {
    OutgoingMail {
        from: TEST_SENDER.to_string(),
        to: TEST_RECIPIENT.to_string(),
        subject: "Daily digest".to_string(),
        html_body: "<html><body><h2>Hello</h2></body></html>".to_string(),
    }
}

/// Plaintext config pointing at a local port nothing listens on.
pub fn unreachable_server_config() -> SmtpMailerConfig {
    SmtpMailerConfig {
        server: "127.0.0.1".to_string(),
        port: 1,
        username: TEST_SENDER.to_string(),
        password: "testpass".to_string(),
        use_starttls: false,
    }
}
