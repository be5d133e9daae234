//! Lifecycle events and the in-process event bus
//!
//! The host application emits a fixed set of domain events. They are modeled
//! as an enum so handler dispatch is exhaustive at compile time, and fanned
//! out over a `tokio::sync::broadcast` channel.

use serde::Deserialize;
use tokio::sync::broadcast;

/// Domain events the mail module reacts to.
///
/// `UserLogin` is carried for wire compatibility with the host application
/// but no email handler is registered for it.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    UserRegistered(UserEventPayload),
    UserActivated(UserEventPayload),
    UserPasswordReset(UserEventPayload),
    UserLogin(UserEventPayload),
}

impl LifecycleEvent {
    /// Template key under which subjects and template identifiers are
    /// configured for this event.
    pub fn template_key(&self) -> &'static str {
        match self {
            LifecycleEvent::UserRegistered(_) => "user.register",
            LifecycleEvent::UserActivated(_) => "user.activated",
            LifecycleEvent::UserPasswordReset(_) => "user.reset",
            LifecycleEvent::UserLogin(_) => "user.login",
        }
    }

    pub fn payload(&self) -> &UserEventPayload {
        match self {
            LifecycleEvent::UserRegistered(payload)
            | LifecycleEvent::UserActivated(payload)
            | LifecycleEvent::UserPasswordReset(payload)
            | LifecycleEvent::UserLogin(payload) => payload,
        }
    }
}

/// Payload shared by all lifecycle events
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserEventPayload {
    pub user: EventUser,
    /// Locale of the user, when the host application knows it
    pub language: Option<String>,
}

/// User object carried by lifecycle events
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventUser {
    pub email: String,
    pub username: String,
    /// Present on registration events
    pub activation: Option<TokenInfo>,
    /// Present on password reset events
    pub reset: Option<TokenInfo>,
}

/// Nested token container (`user.activation.token`, `user.reset.token`)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenInfo {
    pub token: String,
}

/// Single-process publish/subscribe bus for lifecycle events.
///
/// Backed by a broadcast channel: every subscriber sees every event, events
/// emitted with no subscribers are dropped, and a lagging subscriber loses
/// the oldest events rather than applying backpressure.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<LifecycleEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Emit an event to all current subscribers
    pub fn emit(&self, event: LifecycleEvent) {
        // A send error only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LifecycleEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
