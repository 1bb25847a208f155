//! Tern command-line driver.
//!
//! Runs the pipeline parse → classify → unfold → print over files on disk.
//!
//! # Debug Environment Variables
//!
//! - `RUST_LOG=tern_unfold=debug`: Enable debug-level tracing output.
//!   Example: `RUST_LOG=tern_unfold=debug tern unfold a.tn 12:5`
//!
//! - `TERN_LOG_TREE=1`: Render spans as an indented tree instead of flat
//!   lines. Only has an effect together with `RUST_LOG`.

pub mod commands;
pub mod position;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var("TERN_LOG_TREE").is_ok_and(|v| v == "1") {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
