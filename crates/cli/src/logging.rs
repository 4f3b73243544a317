use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// `filter` uses the `env_logger` filter syntax (e.g. `"debug"`,
/// `"typed_gl_core=debug"`). Without one, `RUST_LOG` is read, and without
/// that only warnings and errors are shown.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Warn);
        }

        builder.init();
        log::debug!("logging initialized");
    });
}
