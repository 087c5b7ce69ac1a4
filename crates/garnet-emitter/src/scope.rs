//! Scope Chain.
//!
//! Scopes are strictly stack-nested: a handler that introduces a lexical
//! level pushes a scope, compiles its body, and pops it. A scope's parent is
//! addressed by [`ScopeId`] (its depth in the stack) rather than a pointer,
//! so no scope can outlive the chain that owns it.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Lexical level introduced by a scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    #[default]
    Module,
    Class,
    Method,
    Block,
}

/// Index of a scope in the chain (0 is the unit's top scope).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub locals: IndexSet<String>,
    pub required_helpers: IndexSet<String>,
    pub declared_method_names: Vec<String>,
}

impl Scope {
    fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            parent,
            locals: IndexSet::new(),
            required_helpers: IndexSet::new(),
            declared_method_names: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_class(&self) -> bool {
        self.kind == ScopeKind::Class
    }

    #[must_use]
    pub fn is_module(&self) -> bool {
        self.kind == ScopeKind::Module
    }

    pub fn add_local(&mut self, name: &str) {
        if !self.locals.contains(name) {
            self.locals.insert(name.to_string());
        }
    }

    pub fn add_helper(&mut self, name: &str) {
        if !self.required_helpers.contains(name) {
            self.required_helpers.insert(name.to_string());
        }
    }

    pub fn add_method(&mut self, name: &str) {
        self.declared_method_names.push(name.to_string());
    }
}

/// Stack of open scopes for one compilation unit.
#[derive(Debug, Default)]
pub struct ScopeChain {
    stack: Vec<Scope>,
}

impl ScopeChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope nested in the current innermost one.
    pub fn push(&mut self, kind: ScopeKind) -> ScopeId {
        let parent = self.current();
        self.stack.push(Scope::new(kind, parent));
        let id = ScopeId(self.stack.len() - 1);
        tracing::debug!(?kind, depth = id.0, "push scope");
        id
    }

    /// Close the innermost scope, merging its helper requirements into the
    /// parent. Returns `None` when `id` is not the innermost scope.
    pub fn pop(&mut self, id: ScopeId) -> Option<Scope> {
        if self.current() != Some(id) {
            return None;
        }
        let scope = self.stack.pop()?;
        if let Some(parent) = self.stack.last_mut() {
            for helper in &scope.required_helpers {
                parent.add_helper(helper);
            }
        }
        tracing::debug!(kind = ?scope.kind, depth = id.0, "pop scope");
        Some(scope)
    }

    #[must_use]
    pub fn current(&self) -> Option<ScopeId> {
        self.stack.len().checked_sub(1).map(ScopeId)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.stack.get(id.0)
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.stack.get_mut(id.0)
    }

    /// Whether `name` is a local visible from `id`. Block scopes see their
    /// parents' locals; method, class and module scopes start fresh.
    #[must_use]
    pub fn is_local_visible(&self, id: ScopeId, name: &str) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(scope) = self.get(current) else {
                return false;
            };
            if scope.locals.contains(name) {
                return true;
            }
            if scope.kind != ScopeKind::Block {
                return false;
            }
            cursor = scope.parent;
        }
        false
    }
}

impl Index<ScopeId> for ScopeChain {
    type Output = Scope;

    fn index(&self, id: ScopeId) -> &Scope {
        &self.stack[id.0]
    }
}

impl IndexMut<ScopeId> for ScopeChain {
    fn index_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.stack[id.0]
    }
}
