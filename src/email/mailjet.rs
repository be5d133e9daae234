//! Mailjet email provider implementation
//!
//! Talks to the Mailjet v3 Send API over HTTPS with basic auth. One POST per
//! send, no retries; retry and bounce handling are owned by Mailjet.

use super::provider::{EmailProvider, EmailProviderError};
use crate::config::MailjetConfig;
use crate::domain::SendRequest;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

/// Mailjet API provider
pub struct MailjetProvider {
    client: reqwest::Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl MailjetProvider {
    /// Create a new Mailjet provider from configuration.
    ///
    /// Empty credentials are accepted here; they fail at the API with 401
    /// rather than blocking startup.
    pub fn from_config(config: &MailjetConfig) -> Result<Self, EmailProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| EmailProviderError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/v3/send", self.base_url)
    }
}

#[async_trait]
impl EmailProvider for MailjetProvider {
    async fn send(&self, request: &SendRequest) -> Result<(), EmailProviderError> {
        let response = self
            .client
            .post(self.send_url())
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| EmailProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            // Full detail stays in the logs; callers only see the status code.
            error!(status = status.as_u16(), body = %body, "Mailjet send failed");
            return Err(EmailProviderError::Api {
                status: status.as_u16(),
            });
        }

        debug!(body = %body, "Mailjet send response");
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mailjet"
    }
}
