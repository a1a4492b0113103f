use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::formatter::FrameFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Installs the global tracing subscriber. Later calls are no-ops.
///
/// `RUST_LOG` overrides the default filter of `warn` everywhere and `info` for this crate.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().event_format(FrameFormatter))
            .with(ErrorLayer::default())
            .try_init();

        if let Err(e) = result {
            eprintln!("Failed to install tracing subscriber: {e}");
        }
    });
}
