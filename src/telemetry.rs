//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! the pretty or the JSON formatter, per [`LoggingConfig`]. Output goes to
//! stderr so command output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize logging
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(&config.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn default_filter(level: &str) -> String {
    format!("chartboard={level},tower_http={level}", level = level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "chartboard=debug,tower_http=debug");
    }
}
