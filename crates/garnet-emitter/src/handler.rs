//! Node Handler contract.
//!
//! A [`NodeCompiler`] is created for exactly one handler invocation. It
//! carries the node's kind and position, the context the caller asked for,
//! and the buffer the handler writes into. Handlers use its primitives:
//!
//! - `push` / `line` / `wrap` to emit text
//! - `expr` / `stmt` / `recv` / `process` to compile children at a level
//! - `is_recv` / `is_stmt` to query the requested level
//! - `helper` to require a runtime support routine
//! - `returns` to ask the compiler for the "capture final value" rewrite

use crate::compiler::Compiler;
use crate::context::{CompileContext, Level};
use crate::error::{CompileError, CompileResult};
use crate::fragment::{FragmentBuffer, IntoFragments};
use crate::scope::{Scope, ScopeKind};
use garnet_ast::{AstNode, Child, Tag};
use garnet_common::SourcePosition;

pub struct NodeCompiler<'a> {
    compiler: &'a mut Compiler,
    kind: Tag,
    origin: Option<SourcePosition>,
    ctx: CompileContext,
    fragments: FragmentBuffer,
}

impl<'a> NodeCompiler<'a> {
    pub(crate) fn new(compiler: &'a mut Compiler, node: &AstNode, ctx: CompileContext) -> Self {
        Self {
            compiler,
            kind: node.kind,
            origin: node.position,
            ctx,
            fragments: FragmentBuffer::new(),
        }
    }

    pub(crate) fn finish(self) -> FragmentBuffer {
        self.fragments
    }

    // =========================================================================
    // Context Queries
    // =========================================================================

    #[must_use]
    pub fn kind(&self) -> Tag {
        self.kind
    }

    #[must_use]
    pub fn origin(&self) -> Option<SourcePosition> {
        self.origin
    }

    #[must_use]
    pub fn context(&self) -> CompileContext {
        self.ctx
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.ctx.level
    }

    /// True when this node is the receiver of a following call.
    #[must_use]
    pub fn is_recv(&self) -> bool {
        self.ctx.is_recv()
    }

    /// True when this node is compiled as a standalone statement.
    #[must_use]
    pub fn is_stmt(&self) -> bool {
        self.ctx.is_stmt()
    }

    /// The innermost open scope.
    #[must_use]
    pub fn scope(&self) -> &Scope {
        self.compiler.scope(self.ctx.scope)
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        self.compiler.scope_mut(self.ctx.scope)
    }

    /// True when the fragments written so far form no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.fragments.ends_with(suffix)
    }

    // =========================================================================
    // Child Extraction
    // =========================================================================

    /// Children of `node`, validated to be exactly `arity` long.
    pub fn children<'n>(&self, node: &'n AstNode, arity: usize) -> CompileResult<&'n [Child]> {
        if node.len() != arity {
            return Err(self.malformed(format!(
                "expected {arity} children, found {}",
                node.len()
            )));
        }
        Ok(&node.children)
    }

    /// Child node at `idx`, failing with `MalformedNode` when it is missing
    /// or not a node.
    pub fn child_node<'n>(
        &self,
        node: &'n AstNode,
        idx: usize,
        what: &str,
    ) -> CompileResult<&'n AstNode> {
        node.node_at(idx)
            .ok_or_else(|| self.malformed(format!("missing {what} (child {idx})")))
    }

    /// Text payload of a name-carrying child (`sym`, `str`, bare name).
    pub fn name_at(&self, node: &AstNode, idx: usize, what: &str) -> CompileResult<String> {
        let text = match node.child(idx) {
            Some(Child::Literal(lit)) => lit.as_text(),
            Some(Child::Node(inner)) if matches!(inner.kind, Tag::Sym | Tag::Str) => {
                inner.text_value()
            }
            _ => None,
        };
        text.map(str::to_string)
            .ok_or_else(|| self.malformed(format!("{what} must be a name (child {idx})")))
    }

    // =========================================================================
    // Emission
    // =========================================================================

    /// Append pieces in order.
    pub fn push(&mut self, pieces: impl IntoFragments) {
        pieces.push_into(&mut self.fragments, self.origin);
    }

    /// Append pieces on a new line (no line break before the first content).
    pub fn line(&mut self, pieces: impl IntoFragments) {
        if !self.fragments.is_empty() {
            self.fragments.push_text("\n", None);
        }
        pieces.push_into(&mut self.fragments, self.origin);
    }

    /// Surround everything written so far.
    pub fn wrap(&mut self, prefix: &str, suffix: &str) {
        self.fragments.wrap(prefix, suffix, self.origin);
    }

    /// Append `;` unless the output already ends a statement.
    pub fn terminate(&mut self) {
        if !self.fragments.is_empty() && !self.ends_with(";") && !self.ends_with("}") {
            self.push(";");
        }
    }

    // =========================================================================
    // Recursive Compilation
    // =========================================================================

    /// Compile `node` at `level` in the current scope.
    pub fn process(&mut self, node: &AstNode, level: Level) -> CompileResult<FragmentBuffer> {
        self.compiler.process(node, self.ctx.with_level(level))
    }

    pub fn expr(&mut self, node: &AstNode) -> CompileResult<FragmentBuffer> {
        self.process(node, Level::Expression)
    }

    pub fn stmt(&mut self, node: &AstNode) -> CompileResult<FragmentBuffer> {
        self.process(node, Level::Statement)
    }

    /// Compile `node` as the receiver of a call.
    pub fn recv(&mut self, node: &AstNode) -> CompileResult<FragmentBuffer> {
        self.process(node, Level::Receiver)
    }

    /// Compile `node` at the level this node was asked for.
    pub fn same_level(&mut self, node: &AstNode) -> CompileResult<FragmentBuffer> {
        self.process(node, self.ctx.level)
    }

    /// "Capture final value" rewrite of `node`.
    pub fn returns(&self, node: &AstNode) -> CompileResult<AstNode> {
        self.compiler.returns(node)
    }

    /// Record that the unit needs the runtime routine `name`.
    pub fn helper(&mut self, name: &str) {
        self.scope_mut().add_helper(name);
    }

    /// Run `f` with a freshly pushed scope as the current one.
    ///
    /// The scope is popped exactly once, whether or not `f` succeeds.
    pub fn in_scope<T>(
        &mut self,
        kind: ScopeKind,
        f: impl FnOnce(&mut Self) -> CompileResult<T>,
    ) -> CompileResult<T> {
        let outer = self.ctx;
        let id = self.compiler.push_scope(kind);
        self.ctx = outer.with_scope(id);
        let result = f(self);
        self.ctx = outer;
        self.compiler.pop_scope(id);
        result
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[must_use]
    pub fn malformed(&self, reason: impl Into<String>) -> CompileError {
        CompileError::MalformedNode {
            kind: self.kind,
            position: self.origin,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unsupported(&self, detail: impl Into<String>) -> CompileError {
        CompileError::UnsupportedConstruct {
            kind: self.kind,
            position: self.origin,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn invalid_literal(&self, reason: impl Into<String>) -> CompileError {
        CompileError::InvalidLiteral {
            kind: self.kind,
            position: self.origin,
            reason: reason.into(),
        }
    }
}
