use anyhow::Context;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use crate::configuration::EmailSettings;
use crate::domain::ComposedEmail;

/// The outbound delivery capability, injected into the handlers so the test
/// suite can swap in a recording double instead of a live SMTP connection.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, recipient: &str, email: ComposedEmail) -> Result<(), anyhow::Error>;
}

/// Production transport: a single pooled async SMTP connection, built once at
/// startup from [`EmailSettings`] and shared by all requests.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpMailer {
    pub fn new(settings: &EmailSettings) -> Result<Self, anyhow::Error> {
        let credentials = Credentials::new(
            settings.username.clone(),
            settings.password.expose_secret().clone(),
        );

        let builder = if settings.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
        }
        .context("Failed to create the SMTP transport")?;

        let transport = builder
            .port(settings.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            sender: settings.username.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    #[tracing::instrument(
        name = "Dispatch email over SMTP",
        skip(self, email),
        fields(subject = %email.subject)
    )]
    async fn send(&self, recipient: &str, email: ComposedEmail) -> Result<(), anyhow::Error> {
        let message = Message::builder()
            .from(
                self.sender
                    .parse()
                    .context("Sender address is not a valid mailbox")?,
            )
            .to(recipient
                .parse()
                .context("Recipient address is not a valid mailbox")?)
            .reply_to(
                email
                    .reply_to
                    .parse()
                    .context("Reply-to address is not a valid mailbox")?,
            )
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)
            .context("Failed to assemble the outgoing message")?;

        let response = self
            .transport
            .send(message)
            .await
            .context("SMTP transport rejected the message")?;

        if !response.is_positive() {
            anyhow::bail!("SMTP server answered with {}", response.code());
        }

        Ok(())
    }
}
