//! Dispatch Registry.
//!
//! Maps node tags to the handler that compiles them. The default table is
//! built once from the explicit list in [`crate::nodes::register_defaults`]
//! and is read-only afterwards, so any number of compilation units can share
//! it across threads. Embedders that add node kinds build their own table
//! with [`RegistryBuilder`].

use crate::error::{CompileError, CompileResult};
use crate::handler::NodeCompiler;
use garnet_ast::{AstNode, Tag};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Handler logic for one family of node kinds.
///
/// Handlers are stateless; all per-invocation state (context, buffer, scope
/// access) lives in the [`NodeCompiler`] created for that one call.
pub trait NodeHandler: Send + Sync {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()>;
}

/// Read-only tag to handler table.
pub struct Registry {
    handlers: FxHashMap<Tag, Arc<dyn NodeHandler>>,
}

static DEFAULT_REGISTRY: Lazy<Arc<Registry>> =
    Lazy::new(|| Arc::new(RegistryBuilder::with_defaults().build()));

impl Registry {
    /// Shared table with every built-in handler.
    #[must_use]
    pub fn shared() -> Arc<Registry> {
        Arc::clone(&DEFAULT_REGISTRY)
    }

    /// Handler for `node`'s kind, or `UnknownNodeKind`.
    pub fn resolve(&self, node: &AstNode) -> CompileResult<Arc<dyn NodeHandler>> {
        self.handlers
            .get(&node.kind)
            .cloned()
            .ok_or(CompileError::UnknownNodeKind {
                kind: node.kind,
                position: node.position,
            })
    }

    #[must_use]
    pub fn handles(&self, tag: Tag) -> bool {
        self.handlers.contains_key(&tag)
    }

    /// Registered tags in declaration order.
    #[must_use]
    pub fn tags(&self) -> Vec<Tag> {
        Tag::ALL
            .iter()
            .copied()
            .filter(|tag| self.handles(*tag))
            .collect()
    }
}

/// Builds a [`Registry`] from `(tags, handler)` pairs.
#[derive(Default)]
pub struct RegistryBuilder {
    handlers: FxHashMap<Tag, Arc<dyn NodeHandler>>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-populated with the built-in handlers.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut builder = Self::new();
        crate::nodes::register_defaults(&mut builder);
        builder
    }

    /// Register one handler for several tags (aliases).
    ///
    /// A tag that already has a handler is taken over by the new one.
    pub fn register<H>(&mut self, tags: &[Tag], handler: H) -> &mut Self
    where
        H: NodeHandler + 'static,
    {
        let handler: Arc<dyn NodeHandler> = Arc::new(handler);
        for &tag in tags {
            if self.handlers.insert(tag, Arc::clone(&handler)).is_some() {
                tracing::debug!(%tag, "handler replaced");
            }
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Registry {
        Registry {
            handlers: self.handlers,
        }
    }
}
