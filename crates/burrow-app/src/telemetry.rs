//! Logging bootstrap. Only the binary calls this; library crates just emit
//! `tracing` events.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable holding the log filter, e.g. `burrow_sim=debug`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Install the global subscriber. A second call is a no-op.
pub fn init(pretty: bool) {
    let filter = std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = if pretty {
        fmt::layer().pretty().boxed()
    } else {
        fmt::layer().compact().boxed()
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
