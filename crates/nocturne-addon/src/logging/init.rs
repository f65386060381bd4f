use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` syntax (e.g. "info",
/// "nocturne_addon=debug"); when unset, `RUST_LOG` is honored and the
/// fallback level is `info`.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

static INIT: Once = Once::new();

/// Installs the global `env_logger` backend once.
///
/// Idempotent; later calls are ignored, so an addon may call this from its
/// factory without caring whether the embedding host got there first.
pub fn init_logging(config: LogConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        // try_init: a host may have installed its own `log` backend without
        // going through this module.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        init_logging(LogConfig::default());
        init_logging(LogConfig {
            filter: Some("debug".to_owned()),
            ..LogConfig::default()
        });
    }
}
