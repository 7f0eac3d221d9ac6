use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingSettings;

/// Initialize the global tracing subscriber from logging settings.
/// An explicit `RUST_LOG` still wins over the configured level.
pub fn init_tracing(settings: &LoggingSettings) {
    let env_filter = filter_from(settings);

    if settings.enable_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    }

    tracing::info!(
        level = %settings.level,
        json_format = settings.enable_json,
        "Harness logging initialized"
    );
}

/// Scoped subscriber for one test run. The returned guard keeps the
/// subscriber active for the current thread until dropped, so concurrent
/// tests do not fight over global logger state.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let settings = LoggingSettings::default();

    tracing_subscriber::registry()
        .with(filter_from(&settings))
        .with(fmt::layer().with_test_writer())
        .set_default()
}

fn filter_from(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},mooring=debug", settings.level)))
}
