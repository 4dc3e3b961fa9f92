use std::sync::Once;

/// Logger configuration.
///
/// `tag` is the logcat tag on Android and is ignored elsewhere.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "trigon_engine=debug") and is only honored off-device. On Android the
/// level is taken from `max_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub tag: String,
    pub max_level: log::LevelFilter,
    pub env_filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: "NativeApp".to_string(),
            max_level: log::LevelFilter::Info,
            env_filter: None,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is first thing in `android_main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        install(config);
        log::debug!("logging initialized");
    });
}

#[cfg(target_os = "android")]
fn install(config: LoggingConfig) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(config.max_level)
            .with_tag(config.tag),
    );
}

#[cfg(not(target_os = "android"))]
fn install(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = config.env_filter {
        builder.parse_filters(&filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(config.max_level);
    }

    // Tests may have installed a logger already.
    let _ = builder.try_init();
}
