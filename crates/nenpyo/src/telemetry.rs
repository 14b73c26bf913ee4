//! Tracing bootstrap for processes embedding the repository.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
///
/// Debug builds log everything from this crate; release builds only warnings
/// and errors.
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "nenpyo=debug"
    } else {
        "nenpyo=warn"
    }
}

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed, which makes
/// repeated calls (e.g. from several tests) harmless.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter().into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
