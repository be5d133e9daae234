//! Telemetry initialization: structured logging via tracing

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to info-level output for this crate. Pass
/// `json = true` for one-line-per-event JSON logs in deployments.
pub fn init(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mailbridge_core=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        let fmt_layer = tracing_subscriber::fmt::layer().json().flatten_event(true);
        registry.with(fmt_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer();
        registry.with(fmt_layer).init();
    }
}
