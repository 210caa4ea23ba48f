//! Mail transport seam.
//!
//! ARCHITECTURAL RULE: no other module may talk SMTP directly. Everything
//! outbound — campaign fan-out and report attachments — goes through
//! `Notifier`, so per-recipient delivery can replace the one-message
//! fan-out later without touching authorization or reconciliation code.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0}")]
    Transport(String),

    #[error("Invalid recipient address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Build(String),
}

#[derive(Debug, Clone)]
pub struct Recipient {
    pub name: Option<String>,
    pub email: String,
}

impl Recipient {
    fn mailbox(&self) -> Result<Mailbox, NotifyError> {
        let address: Address = self
            .email
            .parse()
            .map_err(|_| NotifyError::Address(self.email.clone()))?;
        Ok(Mailbox::new(self.name.clone(), address))
    }
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// One composed campaign message. All cohort recipients share a single
/// message; the requesting HR is courtesy-copied.
#[derive(Debug, Clone)]
pub struct CampaignEmail {
    pub subject: String,
    pub html_body: String,
    pub recipients: Vec<Recipient>,
    pub cc: Option<Recipient>,
    pub attachment: Option<EmailAttachment>,
}

/// Mail transport abstraction. One call per dispatch, evaluated as a single
/// atomic success/failure — never per-recipient.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_campaign(&self, email: &CampaignEmail) -> Result<(), NotifyError>;
}

/// Production transport: async SMTP over STARTTLS.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(
        host: &str,
        username: String,
        password: String,
        from: &str,
    ) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
            .credentials(Credentials::new(username, password))
            .build();
        let from = from
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("MAIL_FROM is not a valid mailbox: {e}"))?;
        Ok(SmtpNotifier { transport, from })
    }

    fn build_message(&self, email: &CampaignEmail) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.clone());
        for recipient in &email.recipients {
            builder = builder.to(recipient.mailbox()?);
        }
        if let Some(cc) = &email.cc {
            builder = builder.cc(cc.mailbox()?);
        }

        let message = match &email.attachment {
            Some(att) => {
                let content_type = att
                    .content_type
                    .parse::<ContentType>()
                    .map_err(|e| NotifyError::Build(e.to_string()))?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::html(email.html_body.clone()))
                        .singlepart(
                            Attachment::new(att.filename.clone())
                                .body(att.bytes.clone(), content_type),
                        ),
                )
            }
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(email.html_body.clone()),
        };
        message.map_err(|e| NotifyError::Build(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_campaign(&self, email: &CampaignEmail) -> Result<(), NotifyError> {
        let message = self.build_message(email)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}
