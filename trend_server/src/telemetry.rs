use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. RUST_LOG overrides the default
/// info-level filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
