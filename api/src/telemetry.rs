//! Tracing subscriber setup for the server binary

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vg_shared::{LogFormat, LoggingConfig};

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let registry = tracing_subscriber::registry().with(filter);
    let source = config.source_location;

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_file(source).with_line_number(source))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_file(source).with_line_number(source))
            .try_init()?,
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_file(source).with_line_number(source))
            .try_init()?,
    }

    Ok(())
}
