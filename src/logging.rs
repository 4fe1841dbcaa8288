use std::sync::Once;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Installs the stderr subscriber once; `RUST_LOG` overrides the default filter.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        if let Err(err) = result {
            eprintln!("scenetag: tracing subscriber already installed: {err}");
        }
    });
}
