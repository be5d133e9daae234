//! Mailbridge Core - Lifecycle Email Bridge
//!
//! This crate bridges application lifecycle events (user registration,
//! activation, password reset) to templated transactional emails delivered
//! through the Mailjet Send API.

pub mod config;
pub mod domain;
pub mod email;
pub mod error;
pub mod events;
pub mod service;
pub mod telemetry;

// Re-export commonly used types
pub use config::Config;
pub use error::{MailError, Result};
pub use events::{EventBus, LifecycleEvent};
pub use service::MailService;
