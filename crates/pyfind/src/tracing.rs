//! Logging setup for hosts embedding pyfind.
//!
//! The core engine only emits `tracing` events. Hosts either install the
//! bundled subscriber with [`try_init`], or compose [`layer`] into a
//! subscriber of their own.

use tracing::Subscriber;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

use crate::error::Result;

/// Events from the pyfind crates at `info` and above
pub const DEFAULT_FILTER: &str = "pyfind_core=info,pyfind=info";

/// `RUST_LOG` when set, `default_filter` otherwise.
pub fn filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Compact formatting layer restricted by [`filter`], for hosts that build
/// their own subscriber.
pub fn layer<S>(default_filter: &str) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .compact()
        .with_filter(filter(default_filter))
}

/// Install a global subscriber with [`DEFAULT_FILTER`].
pub fn try_init() -> Result<()> {
    try_init_with_filter(DEFAULT_FILTER)
}

/// Install a global subscriber with a custom default filter, e.g.
/// `"pyfind_core=debug"` to see history reuse per search.
///
/// Fails when the process already has a global subscriber.
pub fn try_init_with_filter(default_filter: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(layer(default_filter))
        .try_init()?;
    Ok(())
}
