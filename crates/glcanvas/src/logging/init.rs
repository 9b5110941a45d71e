use std::sync::Once;

/// Logger configuration.
///
/// On native targets `filter` follows the `env_logger` filter syntax (e.g.
/// "info", "glcanvas=debug"). In the browser only a bare level is understood
/// ("warn", "debug", ...); anything else falls back to `info`. Records go to
/// the devtools console through `console_log`.
///
/// `write_style` controls ANSI coloring behavior and only exists where
/// `env_logger` is the backend.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            #[cfg(not(target_arch = "wasm32"))]
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main` or the wasm start function.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        install(config);
        log::debug!("logging initialized");
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn install(config: LoggingConfig) {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = config.filter {
        builder.parse_filters(&filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.write_style(config.write_style);

    // Another logger may already be installed (e.g. by a test harness).
    if let Err(e) = builder.try_init() {
        eprintln!("glcanvas: logger not installed: {e}");
    }
}

#[cfg(target_arch = "wasm32")]
fn install(config: LoggingConfig) {
    let level = config
        .filter
        .as_deref()
        .and_then(|f| f.trim().parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);

    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::warn_1(&format!("glcanvas: logger not installed: {e}").into());
    }
}
