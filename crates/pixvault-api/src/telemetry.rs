//! Tracing initialization.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize the tracing subscriber: `RUST_LOG`-style env filter with a
/// compact console format.
pub fn init_tracing() {
    let console_fmt = tracing_subscriber::fmt::layer()
        .event_format(Format::default().compact().with_target(false));

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixvault=debug,tower_http=debug".into()),
        )
        .with(console_fmt)
        .init();
}
