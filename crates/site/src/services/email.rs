//! Email notifications for contact form submissions.
//!
//! Uses SMTP via lettre. Sends are best-effort: the contact route logs
//! failures and still reports success if the database write went through.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::ContactSubmission;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Email service for contact notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    contact_recipient: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            contact_recipient: config.contact_recipient.clone(),
        })
    }

    /// Notify the site owner about a new submission.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to build or send.
    pub async fn send_contact_notification(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), EmailError> {
        let body = format!(
            "New contact form submission\n\nFrom: {} <{}>\nReceived: {}\n\n{}\n",
            submission.name,
            submission.email,
            submission.created_at.to_rfc3339(),
            submission.message,
        );
        self.send_plain_text(
            &self.contact_recipient,
            &format!("Contact form: {}", submission.name),
            &body,
        )
        .await
    }

    /// Auto-reply to the person who submitted the form.
    ///
    /// # Errors
    ///
    /// Returns error if the message fails to build or send.
    pub async fn send_contact_receipt(
        &self,
        submission: &ContactSubmission,
    ) -> Result<(), EmailError> {
        let body = format!(
            "Hi {},\n\nThanks for getting in touch - your message arrived and I'll \
             reply as soon as I can.\n\nFor reference, you wrote:\n\n{}\n\n- Mara\n",
            submission.name, submission.message,
        );
        self.send_plain_text(
            submission.email.as_str(),
            "Thanks for your message",
            &body,
        )
        .await
    }

    /// Build and send a plain-text message.
    async fn send_plain_text(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.mailer.send(message).await?;
        Ok(())
    }
}
