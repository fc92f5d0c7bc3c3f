use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Tracing stays off unless `TOMATILLO_LOG`
/// (or `RUST_LOG`) holds a valid filter; events go to stderr so report output
/// on stdout stays clean.
pub fn init() {
    let filter = ["TOMATILLO_LOG", "RUST_LOG"]
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                None
            } else {
                EnvFilter::try_new(raw).ok()
            }
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
