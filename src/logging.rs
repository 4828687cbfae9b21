use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::LoggingSettings;

/// Build the log filter; `RUST_LOG` wins over the configured level
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nomad_match={},actix_web=info", settings.level)))
}

/// Install the global subscriber, JSON unless `pretty` is configured
pub fn init_logging(settings: &LoggingSettings) {
    let registry = tracing_subscriber::registry().with(env_filter(settings));

    if settings.format.eq_ignore_ascii_case("pretty") {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .json(),
            )
            .init();
    }
}
