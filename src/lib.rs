//! Vitalia — patient-facing health monitoring core.
//!
//! Domain models, a pure evaluation engine (vital-sign classification and
//! medication dose scheduling), and the operations that compose them over
//! an external record store. Networking, authentication, and rendering
//! belong to the surrounding application.

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod models;
pub mod service;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedders that don't install their own subscriber.
/// Honors RUST_LOG, falling back to [`config::default_log_filter`].
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
    {
        tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);
    }
}
