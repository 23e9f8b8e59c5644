//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Filtering follows `RUST_LOG`. Safe to call more than once; only the first
/// call installs the logger.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a fallback filter used when `RUST_LOG`
/// is not set, e.g. `"bucket_engine=debug"`
pub fn init_with_default_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
