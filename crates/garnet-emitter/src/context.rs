//! Compilation Context.

use crate::scope::ScopeId;

/// Syntactic position a node is compiled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Level {
    /// Standalone statement; the value is discarded.
    Statement,
    /// Value used inside a larger expression.
    Expression,
    /// Value immediately followed by call syntax (`recv.$meth()`).
    Receiver,
}

/// Per-call parameters carried down the recursion.
///
/// Passed by value: a handler derives new contexts for its children and
/// never changes the one it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileContext {
    pub level: Level,
    pub scope: ScopeId,
}

impl CompileContext {
    #[must_use]
    pub const fn new(level: Level, scope: ScopeId) -> Self {
        Self { level, scope }
    }

    #[must_use]
    pub const fn with_level(self, level: Level) -> Self {
        Self { level, ..self }
    }

    #[must_use]
    pub const fn with_scope(self, scope: ScopeId) -> Self {
        Self { scope, ..self }
    }

    #[must_use]
    pub fn is_stmt(&self) -> bool {
        self.level == Level::Statement
    }

    #[must_use]
    pub fn is_recv(&self) -> bool {
        self.level == Level::Receiver
    }
}
