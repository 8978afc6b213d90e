//! Outbound mail over an authenticated relay.
//!
//! STARTTLS is negotiated before authentication, on the standard mail
//! submission port by default. A send failure never destroys an
//! already-produced artifact; callers decide whether to log or abort.

use std::path::Path;

use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MessageBuilder, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};

use crate::Reading;
use crate::error::CoreError;

/// Standard mail submission port.
pub const DEFAULT_RELAY_PORT: u16 = 587;

/// Relay settings, passed in by the caller — no ambient globals.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub relay_host: String,
    pub relay_port: u16,
    pub username: String,
    pub password: SecretString,
    /// RFC 5322 "From" address.
    pub from: String,
    pub recipients: Vec<String>,
}

/// Sends the reporting workflows' mail through the configured relay.
pub struct Mailer {
    config: MailConfig,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Plain-text report of a single reading.
    pub fn send_reading(&self, reading: &Reading) -> Result<(), CoreError> {
        let body = format!(
            "Date and Time: {}\nCurrent Remote Users: {}\nPeak Number of users: {}",
            reading.timestamp.format("%H:%M %d/%m/%Y"),
            reading.current_users,
            reading.peak_users,
        );
        let message = self
            .builder()?
            .subject("VPN users report")
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;
        self.send(&message)
    }

    /// The day's spreadsheet report, attached to a short cover note.
    pub fn send_report(&self, workbook: &Path, date: NaiveDate) -> Result<(), CoreError> {
        let date_str = date.format("%d-%m-%Y").to_string();
        let body = format!(
            "This is the report in Excel Graph format for {date_str} for VPN users \
             and peak values per time of day.\n\nWith Compliments of the Network Section."
        );

        let content = std::fs::read(workbook).map_err(|e| CoreError::MailBuild {
            message: format!("cannot read attachment {}: {e}", workbook.display()),
        })?;
        let filename = workbook
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("vpnusers.xlsx")
            .to_owned();
        let content_type =
            ContentType::parse("application/octet-stream").map_err(|e| CoreError::MailBuild {
                message: e.to_string(),
            })?;

        let message = self
            .builder()?
            .subject(format!("VPN users graph report for {date_str}"))
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body))
                    .singlepart(Attachment::new(filename).body(content, content_type)),
            )?;
        self.send(&message)
    }

    fn builder(&self) -> Result<MessageBuilder, CoreError> {
        let mut builder = Message::builder().from(self.config.from.parse::<Mailbox>()?);
        for recipient in &self.config.recipients {
            builder = builder.to(recipient.parse::<Mailbox>()?);
        }
        Ok(builder)
    }

    fn send(&self, message: &Message) -> Result<(), CoreError> {
        let mailer = SmtpTransport::starttls_relay(&self.config.relay_host)?
            .port(self.config.relay_port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.expose_secret().to_owned(),
            ))
            .build();
        mailer.send(message)?;
        tracing::info!(relay = %self.config.relay_host, "email sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            relay_host: "relay.example.org".to_owned(),
            relay_port: DEFAULT_RELAY_PORT,
            username: "reports@example.org".to_owned(),
            password: SecretString::from("secret"),
            from: "reports@example.org".to_owned(),
            recipients: vec!["noc@example.org".to_owned()],
        }
    }

    #[test]
    fn builder_rejects_malformed_recipient() {
        let mut cfg = config();
        cfg.recipients = vec!["not-an-address".to_owned()];
        let err = Mailer::new(cfg).builder().unwrap_err();
        assert!(matches!(err, CoreError::MailAddress(_)));
    }

    #[test]
    fn builder_accepts_multiple_recipients() {
        let mut cfg = config();
        cfg.recipients = vec!["a@example.org".to_owned(), "b@example.org".to_owned()];
        assert!(Mailer::new(cfg).builder().is_ok());
    }

    #[test]
    fn missing_attachment_is_a_build_error() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let err = Mailer::new(config())
            .send_report(Path::new("/nonexistent/vpnusers.xlsx"), date)
            .unwrap_err();
        assert!(err.is_transmission());
    }
}
