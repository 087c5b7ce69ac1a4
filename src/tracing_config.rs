//! Tracing configuration for debugging emitter output.
//!
//! Supports three output formats controlled by `GARNET_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one level per
//!   nested node dispatch
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! An embedding toolchain calls [`init_tracing`] once before compiling
//! units. The root integration tests call it too:
//!
//! ```bash
//! # Per-node dispatch as an indented tree
//! GARNET_LOG=garnet_emitter=trace GARNET_LOG_FORMAT=tree cargo test --test integration_tests
//!
//! # Unit start/finish, scope push/pop and handler registration only
//! GARNET_LOG=debug cargo test --test integration_tests
//! ```
//!
//! Without `GARNET_LOG` or `RUST_LOG` no subscriber is installed and the
//! `tracing` calls in the emitter stay disabled.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a `GARNET_LOG_FORMAT` value; unknown values fall back to text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("GARNET_LOG_FORMAT").unwrap_or_default())
    }
}

/// `GARNET_LOG` takes precedence over `RUST_LOG`; both use the `RUST_LOG`
/// directive syntax (e.g. `debug`, `garnet_emitter::compiler=trace`).
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("GARNET_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `GARNET_LOG` nor `RUST_LOG` is set. Output goes
/// to stderr so it never mixes with emitted JavaScript on stdout. Calling it
/// again after a subscriber is installed is a no-op.
pub fn init_tracing() {
    let has_garnet_log = std::env::var("GARNET_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_garnet_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    let installed = match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true)
                .with_writer(std::io::stderr);

            Registry::default().with(filter).with(tree_layer).try_init()
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).try_init()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish()
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
