//! Tensa command-line host.
//!
//! Decodes JSON syntax trees produced by the external parser, runs them
//! through the evaluator against the standard runtime, and renders the
//! `{result, issues, state}` outcome.

use std::sync::Once;

pub mod commands;
pub mod decode;
pub mod output;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
