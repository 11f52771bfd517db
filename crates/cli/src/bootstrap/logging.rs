use memefeed_domain::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true);

    if config.logging.json {
        builder.json().init();
    } else {
        builder.with_ansi(true).init();
    }

    info!("Logging initialized at level: {}", config.logging.level);
}
