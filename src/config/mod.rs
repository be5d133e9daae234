//! Configuration management for Mailbridge Core

use crate::domain::SenderProfile;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;

/// Sender key that must exist in every valid configuration.
pub const DEFAULT_SENDER_KEY: &str = "default";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Mailjet API credentials and endpoint
    pub mailjet: MailjetConfig,
    /// Mail module configuration
    pub mail: MailConfig,
}

/// Mailjet API configuration
#[derive(Debug, Clone)]
pub struct MailjetConfig {
    /// API key (basic auth username)
    pub api_key: String,
    /// API secret (basic auth password)
    pub api_secret: String,
    /// Base URL of the Mailjet API, overridable for local testing
    pub base_url: String,
}

impl Default for MailjetConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            base_url: "https://api.mailjet.com".to_string(),
        }
    }
}

/// Mail module configuration
///
/// `subjects` and `templates` are keyed by template key and may carry
/// locale-suffixed variants (e.g. `user.register_EN`) which take precedence
/// when a send requests that language.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Default locale (e.g. "de_DE")
    pub locale: String,
    /// Sender key -> sender profile; the "default" key always exists
    pub senders: HashMap<String, SenderProfile>,
    /// Template key -> subject line
    pub subjects: HashMap<String, String>,
    /// Template key -> Mailjet template identifier
    pub templates: HashMap<String, String>,
    /// When set, replaces the recipient list of every send.
    /// Safety valve for non-production environments.
    pub debug_recipient: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        let mut senders = HashMap::new();
        senders.insert(DEFAULT_SENDER_KEY.to_string(), SenderProfile::default());

        let mut subjects = HashMap::new();
        subjects.insert(DEFAULT_SENDER_KEY.to_string(), String::new());

        Self {
            locale: "de_DE".to_string(),
            senders,
            subjects,
            templates: HashMap::new(),
            debug_recipient: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let senders = parse_map_env::<SenderProfile>("MAIL_SENDERS")?;
        let subjects = parse_map_env::<String>("MAIL_SUBJECTS")?;
        let templates = parse_map_env::<String>("MAIL_TEMPLATES")?;

        let mut mail = MailConfig {
            locale: env::var("MAIL_DEFAULT_LOCALE").unwrap_or_else(|_| "de_DE".to_string()),
            senders,
            subjects,
            templates,
            debug_recipient: env::var("MAIL_DEBUG_RECIPIENT").ok().filter(|s| !s.is_empty()),
        };

        // Merge over defaults: a valid configuration always carries the
        // "default" sender and subject entries.
        mail.senders
            .entry(DEFAULT_SENDER_KEY.to_string())
            .or_default();
        mail.subjects
            .entry(DEFAULT_SENDER_KEY.to_string())
            .or_default();

        Ok(Self {
            mailjet: MailjetConfig {
                api_key: env::var("MAILJET_API_KEY").unwrap_or_default(),
                api_secret: env::var("MAILJET_API_SECRET").unwrap_or_default(),
                base_url: env::var("MAILJET_API_BASE_URL")
                    .unwrap_or_else(|_| "https://api.mailjet.com".to_string()),
            },
            mail,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mailjet: MailjetConfig::default(),
            mail: MailConfig::default(),
        }
    }
}

/// Parse a JSON object from an environment variable into a string-keyed map.
///
/// An unset variable yields an empty map; malformed JSON is an error rather
/// than a silent fallback, since a typo here would drop sender profiles.
fn parse_map_env<T: serde::de::DeserializeOwned>(var: &str) -> Result<HashMap<String, T>> {
    match env::var(var) {
        Ok(raw) if !raw.is_empty() => {
            serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", var))
        }
        _ => Ok(HashMap::new()),
    }
}
