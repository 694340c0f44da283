/// Initializes structured logging for embedders that want the default
/// subscriber.
///
/// Verbosity is controlled through `RUST_LOG` (e.g. `RUST_LOG=info`, or
/// `RUST_LOG=stockroom=debug` to scope to this crate).
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
