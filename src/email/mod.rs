//! Email delivery via the Mailjet Send API
//!
//! The provider seam is a trait so the mail service can be exercised with a
//! mock in unit tests while production uses the HTTP-backed Mailjet client.

pub mod mailjet;
pub mod provider;

pub use mailjet::MailjetProvider;
pub use provider::{EmailProvider, EmailProviderError};
