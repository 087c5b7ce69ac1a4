//! The compiler facility.
//!
//! Owns the state of one compilation unit (scope chain, recursion depth) and
//! drives the depth-first dispatch: look the node's tag up in the registry,
//! run the handler with a fresh [`NodeCompiler`], hand the buffer back to the
//! caller.

use crate::context::{CompileContext, Level};
use crate::error::{CompileError, CompileResult};
use crate::fragment::FragmentBuffer;
use crate::handler::NodeCompiler;
use crate::options::CompilerOptions;
use crate::registry::Registry;
use crate::scope::{Scope, ScopeChain, ScopeId, ScopeKind};
use crate::unit::CompiledUnit;
use garnet_ast::{AstNode, Child, Tag};
use std::sync::Arc;

pub struct Compiler {
    registry: Arc<Registry>,
    scopes: ScopeChain,
    options: CompilerOptions,
    depth: u32,
}

impl Compiler {
    /// Compiler using the built-in handler table.
    #[must_use]
    pub fn new(options: CompilerOptions) -> Self {
        Self::with_registry(Registry::shared(), options)
    }

    #[must_use]
    pub fn with_registry(registry: Arc<Registry>, options: CompilerOptions) -> Self {
        Compiler {
            registry,
            scopes: ScopeChain::new(),
            options,
            depth: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    /// Compile a whole unit rooted at `root`.
    ///
    /// The unit's top scope is opened before the root is dispatched and
    /// closed afterwards; its helpers, locals and declared methods are
    /// returned with the fragments. Any failure discards the unit.
    pub fn compile(mut self, root: &AstNode, level: Level) -> CompileResult<CompiledUnit> {
        tracing::debug!(file = %self.options.file, root = %root.kind, "compiling unit");

        let top = self.push_scope(self.options.unit_scope);
        let result = self.process(root, CompileContext::new(level, top));
        let top_scope = self.scopes.pop(top);
        let fragments = result?;

        let Some(top_scope) = top_scope else {
            return Err(CompileError::UnsupportedConstruct {
                kind: root.kind,
                position: root.position,
                detail: "scope chain left unbalanced".to_string(),
            });
        };

        let unit = CompiledUnit::new(fragments.into_vec(), top_scope, &self.options);
        tracing::debug!(
            fragments = unit.fragments().len(),
            helpers = ?unit.helpers(),
            "unit compiled"
        );
        Ok(unit)
    }

    /// Compile `node` for `ctx`, returning its fragments unmerged.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = %node.kind, level = ?ctx.level))]
    pub fn process(&mut self, node: &AstNode, ctx: CompileContext) -> CompileResult<FragmentBuffer> {
        if self.depth >= self.options.max_depth {
            return Err(CompileError::UnsupportedConstruct {
                kind: node.kind,
                position: node.position,
                detail: format!("nesting exceeds {} levels", self.options.max_depth),
            });
        }

        let handler = self.registry.resolve(node)?;

        self.depth += 1;
        let mut cx = NodeCompiler::new(self, node, ctx);
        let result = handler.compile(node, &mut cx);
        let fragments = cx.finish();
        self.depth -= 1;

        result.map(|()| fragments)
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    pub(crate) fn push_scope(&mut self, kind: ScopeKind) -> ScopeId {
        self.scopes.push(kind)
    }

    pub(crate) fn pop_scope(&mut self, id: ScopeId) {
        if self.scopes.pop(id).is_none() {
            tracing::warn!(depth = id.0, "attempted to pop a scope that is not innermost");
        }
    }

    pub(crate) fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id]
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id]
    }

    // =========================================================================
    // Capture Final Value
    // =========================================================================

    /// Rewrite `node` so that its final evaluated value is explicitly
    /// returned. The input is left untouched; a new node is derived.
    ///
    /// Fails with `UnsupportedConstruct` when the last-statement chain is
    /// nested deeper than the unit's depth limit.
    pub fn returns(&self, node: &AstNode) -> CompileResult<AstNode> {
        returns_at(node, 0, self.options.max_depth)
    }
}

fn js_return(value: AstNode) -> AstNode {
    let position = value.position;
    AstNode::new(Tag::JsReturn, [Child::Node(value)]).with_position(position)
}

fn nil_at(node: &AstNode) -> AstNode {
    AstNode::new(Tag::Nil, []).with_position(node.position)
}

fn returns_at(node: &AstNode, depth: u32, limit: u32) -> CompileResult<AstNode> {
    if depth >= limit {
        return Err(CompileError::UnsupportedConstruct {
            kind: node.kind,
            position: node.position,
            detail: format!("final value nested deeper than {limit} levels"),
        });
    }

    let rewritten = match node.kind {
        Tag::Begin | Tag::KwBegin | Tag::Evstr => {
            let mut children = node.children.clone();
            let last = match children.pop() {
                Some(Child::Node(inner)) => returns_at(&inner, depth + 1, limit)?,
                _ => js_return(nil_at(node)),
            };
            children.push(Child::Node(last));
            node.updated(None, children)
        }
        Tag::If => {
            let mut children = node.children.clone();
            children.resize(3, Child::Empty);
            for branch in &mut children[1..3] {
                let rewritten = match branch {
                    Child::Node(inner) => returns_at(inner, depth + 1, limit)?,
                    _ => js_return(nil_at(node)),
                };
                *branch = Child::Node(rewritten);
            }
            node.updated(None, children)
        }
        Tag::JsReturn | Tag::Return => node.clone(),
        Tag::Xstr => {
            let already_returns = node
                .children
                .iter()
                .filter_map(|child| match child {
                    Child::Literal(lit) => lit.as_text(),
                    Child::Node(part) if part.kind == Tag::Str => part.text_value(),
                    _ => None,
                })
                .any(|text| text.contains("return"));
            if already_returns {
                node.clone()
            } else {
                js_return(node.clone())
            }
        }
        _ => js_return(node.clone()),
    };
    Ok(rewritten)
}
