mod common;

use common::*;
use std::env;

/// Manual Gmail submission test - IGNORED BY DEFAULT
///
/// Sends one HTML message to yourself through smtp.gmail.com:587 with STARTTLS,
/// the same path the scanner uses for its digest.
///
/// ## Setup Instructions:
///
/// 1. **Create an App Password** (accounts with 2FA):
///    - Google Account → Security → 2-Step Verification → App passwords
///
/// 2. **Set Environment Variables**:
///    ```bash
///    export EMAIL_USER="your-email@gmail.com"
///    export EMAIL_PASSWORD="your-app-password"
///    ```
///
/// 3. **Run the test**:
///    ```bash
///    cargo test -p email-delivery gmail_manual_send_test -- --ignored --nocapture
///    ```
#[tokio::test]
#[ignore = "Manual test - requires Gmail credentials"]
async fn gmail_manual_send_test() {
    init_tracing();

    let (user, password) = match (env::var("EMAIL_USER"), env::var("EMAIL_PASSWORD")) {
        (Ok(user), Ok(password)) => (user, password),
        _ => panic!("EMAIL_USER and EMAIL_PASSWORD must be set for this test"),
    };

    let mailer = SmtpMailer::with_config(SmtpMailerConfig::gmail(user.clone(), password));
    let mail = OutgoingMail {
        from: user.clone(),
        to: user,
        subject: "email-delivery manual test".to_string(),
        html_body: "<html><body><p>If you can read this, SMTP submission works.</p></body></html>"
            .to_string(),
    };

    match mailer.send(&mail).await {
        Ok(()) => println!("Mail submitted, check your inbox"),
        Err(e) if e.is_auth() => panic!("Gmail rejected the credentials: {}", e),
        Err(e) => panic!("Submission failed: {}", e),
    }
}
