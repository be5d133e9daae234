//! Domain types for Mailbridge Core

mod mail;

pub use mail::{Recipient, SendOptions, SendRequest, SenderProfile, WireRecipient};
