//! Service layer for Mailbridge Core

mod mail;

pub use mail::MailService;
