mod common;

use common::*;
use interfaces::defs::ServiceError;

#[test]
fn builds_html_message_with_headers() {
    let message = SmtpMailer::build_message(&sample_mail()).expect("message should build");
    let formatted = String::from_utf8(message.formatted()).unwrap();

    assert!(formatted.contains("From: scanner@localhost"));
    assert!(formatted.contains("To: reader@localhost"));
    assert!(formatted.contains("Subject: Daily digest"));
    assert!(formatted.contains("Content-Type: text/html; charset=utf-8"));
    assert!(formatted.contains("<h2>Hello</h2>"));
}

#[test]
fn rejects_invalid_sender_address() {
    let mut mail = sample_mail();
    mail.from = "not an address".to_string();

    let err = SmtpMailer::build_message(&mail).unwrap_err();
    assert!(matches!(err, ServiceError::Parse(_)), "got {:?}", err);
}

#[test]
fn rejects_invalid_recipient_address() {
    let mut mail = sample_mail();
    mail.to = String::new();

    let err = SmtpMailer::build_message(&mail).unwrap_err();
    assert!(matches!(err, ServiceError::Parse(_)), "got {:?}", err);
}

#[test]
fn gmail_config_uses_submission_port_with_starttls() {
    let config = SmtpMailerConfig::gmail("me@example.com", "secret");
    assert_eq!(config.server, "smtp.gmail.com");
    assert_eq!(config.port, 587);
    assert!(config.use_starttls);
}

#[test]
fn debug_output_hides_password() {
    let config = SmtpMailerConfig::gmail("me@example.com", "super-secret");
    let rendered = format!("{:?}", config);
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("me@example.com"));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    init_tracing();

    let mailer = SmtpMailer::with_config(unreachable_server_config());
    let err = mailer.send(&sample_mail()).await.unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)), "got {:?}", err);
    assert!(!err.is_auth());
}

#[tokio::test]
async fn invalid_address_fails_before_connecting() {
    let mailer = SmtpMailer::with_config(unreachable_server_config());
    let mut mail = sample_mail();
    mail.to = "nobody".to_string();

    let err = mailer.send(&mail).await.unwrap_err();
    assert!(matches!(err, ServiceError::Parse(_)), "got {:?}", err);
}
