//! Mail service bridging lifecycle events to outbound transactional email

use crate::config::{Config, DEFAULT_SENDER_KEY};
use crate::email::{EmailProvider, MailjetProvider};
use crate::error::{MailError, Result};
use crate::events::{EventBus, LifecycleEvent, UserEventPayload};
use crate::domain::{Recipient, SendOptions, SendRequest, WireRecipient};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Bridge between domain events and outbound transactional email.
///
/// Holds the immutable configuration and a single provider client instance;
/// each send assembles an independent request, so concurrent sends need no
/// coordination.
pub struct MailService {
    config: Arc<Config>,
    provider: Option<Arc<dyn EmailProvider>>,
}

impl MailService {
    /// Construct the service and its provider client.
    ///
    /// Client construction failures are downgraded to a warning so the module
    /// always finishes initialization; affected sends fail at call time.
    pub fn new(config: Arc<Config>) -> Self {
        debug!("Initializing mail service");

        if config.mailjet.api_key.is_empty() {
            error!("Mailjet API key not set");
        }
        if config.mailjet.api_secret.is_empty() {
            error!("Mailjet API secret not set");
        }

        let provider = match MailjetProvider::from_config(&config.mailjet) {
            Ok(provider) => Some(Arc::new(provider) as Arc<dyn EmailProvider>),
            Err(e) => {
                warn!(error = %e, "Failed to construct mail provider client, sends will fail");
                None
            }
        };

        Self { config, provider }
    }

    #[cfg(test)]
    fn with_provider(config: Arc<Config>, provider: Arc<dyn EmailProvider>) -> Self {
        Self {
            config,
            provider: Some(provider),
        }
    }

    #[cfg(test)]
    fn without_provider(config: Arc<Config>) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Subscribe to the event bus and handle lifecycle events until the bus
    /// is closed.
    pub fn attach(self: &Arc<Self>, bus: &EventBus) -> JoinHandle<()> {
        let mut rx = bus.subscribe();
        let service = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => service.handle_event(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, "Mail event subscriber lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    async fn handle_event(&self, event: LifecycleEvent) {
        let template_key = event.template_key();

        let payload = match &event {
            LifecycleEvent::UserRegistered(payload)
            | LifecycleEvent::UserActivated(payload)
            | LifecycleEvent::UserPasswordReset(payload) => payload,
            // Login notifications are intentionally not wired up.
            LifecycleEvent::UserLogin(_) => return,
        };

        let token = match &event {
            LifecycleEvent::UserRegistered(payload) => payload.user.activation.as_ref(),
            LifecycleEvent::UserPasswordReset(payload) => payload.user.reset.as_ref(),
            _ => None,
        };

        let options = self.event_send_options(template_key, payload, token.map(|t| t.token.as_str()));
        let recipient = Recipient::with_name(&payload.user.email, &payload.user.username);

        match self.send_mail(DEFAULT_SENDER_KEY, &[recipient], options).await {
            Ok(()) => info!(event = template_key, "Email for {} sent", template_key),
            Err(e) => error!(event = template_key, error = %e, "Email send failed"),
        }
    }

    fn event_send_options(
        &self,
        template_key: &str,
        payload: &UserEventPayload,
        token: Option<&str>,
    ) -> SendOptions {
        let mut data = serde_json::Map::new();
        data.insert("email".to_string(), payload.user.email.clone().into());
        data.insert("name".to_string(), payload.user.username.clone().into());
        if let Some(token) = token {
            data.insert("token".to_string(), token.into());
        }

        SendOptions {
            template: Some(template_key.to_string()),
            language: payload.language.clone(),
            data,
            subject: Some(
                self.config
                    .mail
                    .subjects
                    .get(template_key)
                    .cloned()
                    .unwrap_or_default(),
            ),
            ..Default::default()
        }
    }

    /// Send an email to a list of recipients.
    ///
    /// `sender_key` selects the sender profile from configuration; an empty
    /// key falls back to `"default"`. All validation happens before any
    /// network I/O. Provider failures surface only the HTTP status code.
    pub async fn send_mail(
        &self,
        sender_key: &str,
        recipients: &[Recipient],
        options: SendOptions,
    ) -> Result<()> {
        let sender_key = if sender_key.is_empty() {
            DEFAULT_SENDER_KEY
        } else {
            sender_key
        };

        let sender = self
            .config
            .mail
            .senders
            .get(sender_key)
            .ok_or_else(|| MailError::NoSender(sender_key.to_string()))?;

        let mut template = options.template;
        let mut subject = options.subject;

        // Locale resolution is opportunistic: a missing locale-suffixed entry
        // silently falls back to the base key.
        if let (Some(base), Some(language)) = (&template, &options.language) {
            let localized = format!("{}_{}", base, language.to_uppercase());
            if let Some(localized_subject) = self.config.mail.subjects.get(&localized) {
                subject = Some(localized_subject.clone());
            }
            if self.config.mail.templates.contains_key(&localized) {
                template = Some(localized);
            }
        }

        let template_id = match &template {
            Some(key) => self
                .config
                .mail
                .templates
                .get(key)
                .cloned()
                .ok_or_else(|| MailError::NoTemplateId(key.clone()))?,
            None => String::new(),
        };

        if recipients.is_empty() {
            return Err(MailError::NoRecipients);
        }

        let mut wire_recipients = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            if recipient.cc.is_some() || recipient.bcc.is_some() {
                warn!("CC and BCC not supported yet");
            }
            if recipient.email.is_empty() {
                return Err(MailError::RecipientWithoutEmail);
            }
            wire_recipients.push(WireRecipient {
                email: recipient.email.clone(),
                name: recipient.name.clone().unwrap_or_default(),
            });
        }

        // Environment safety valve: never contact real recipients when the
        // debug override is configured.
        if let Some(debug_recipient) = &self.config.mail.debug_recipient {
            wire_recipients = vec![WireRecipient {
                email: debug_recipient.clone(),
                name: debug_recipient.clone(),
            }];
        }

        let request = SendRequest {
            from_email: sender.email.clone(),
            from_name: sender.name.clone(),
            subject: subject.unwrap_or_default(),
            text_part: options.text.unwrap_or_default(),
            html_part: options.html.unwrap_or_default(),
            template_language: true,
            vars: options.data,
            recipients: wire_recipients,
            template_id,
        };

        let provider = self.provider.as_ref().ok_or(MailError::NotConfigured)?;
        provider.send(&request).await?;

        Ok(())
    }
}
