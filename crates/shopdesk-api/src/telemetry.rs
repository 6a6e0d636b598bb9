use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

const DEFAULT_FILTER: &str = "shopdesk=debug,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `log_format` of `json` emits one JSON object per event; anything else uses
/// the compact console format.
pub fn init_telemetry(log_format: &str) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    let result = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer().event_format(
                    Format::default().compact().with_target(false),
                ),
            )
            .try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!(log_format, "Tracing initialized");
    Ok(())
}
