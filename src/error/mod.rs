//! Unified error handling for Mailbridge Core

use crate::email::EmailProviderError;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, MailError>;

/// Mail module error types.
///
/// Configuration and input errors are raised synchronously before any
/// network I/O. Provider failures surface only the HTTP status code; the
/// full error detail is logged where it occurs and dropped from the
/// caller-visible contract.
#[derive(Error, Debug)]
pub enum MailError {
    #[error("No sender configured for {0}")]
    NoSender(String),

    #[error("No template id configured for {0}")]
    NoTemplateId(String),

    #[error("Recipients not set or empty")]
    NoRecipients,

    #[error("Recipient has no email set")]
    RecipientWithoutEmail,

    #[error("Email provider not configured")]
    NotConfigured,

    #[error("Provider rejected the request with status {status}")]
    Provider { status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<EmailProviderError> for MailError {
    fn from(err: EmailProviderError) -> Self {
        match err {
            EmailProviderError::Api { status } => MailError::Provider { status },
            EmailProviderError::NotConfigured => MailError::NotConfigured,
            EmailProviderError::Transport(msg) => MailError::Transport(msg),
            EmailProviderError::InvalidConfiguration(msg) => MailError::Transport(msg),
        }
    }
}
