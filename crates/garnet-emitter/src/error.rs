//! Compilation failures.
//!
//! Every failure is fatal to the unit being compiled: the engine never emits
//! partial output, it returns one of these and the caller turns it into a
//! diagnostic.

use garnet_ast::Tag;
use garnet_common::SourcePosition;
use garnet_common::diagnostics::{Diagnostic, diagnostic_codes};

pub type CompileResult<T> = Result<T, CompileError>;

fn at(position: &Option<SourcePosition>) -> String {
    match position {
        Some(pos) => format!(" at {pos}"),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// Dispatch found no handler for the node's tag.
    #[error("no handler registered for '{kind}' nodes{}", at(.position))]
    UnknownNodeKind {
        kind: Tag,
        position: Option<SourcePosition>,
    },

    /// The node's children do not have the shape its handler expects.
    #[error("malformed '{kind}' node{}: {reason}", at(.position))]
    MalformedNode {
        kind: Tag,
        position: Option<SourcePosition>,
        reason: String,
    },

    /// A structurally valid node in a position its handler cannot compile.
    #[error("unsupported construct in '{kind}' node{}: {detail}", at(.position))]
    UnsupportedConstruct {
        kind: Tag,
        position: Option<SourcePosition>,
        detail: String,
    },

    /// A literal value that the target literal syntax cannot express.
    #[error("invalid literal in '{kind}' node{}: {reason}", at(.position))]
    InvalidLiteral {
        kind: Tag,
        position: Option<SourcePosition>,
        reason: String,
    },
}

impl CompileError {
    #[must_use]
    pub fn kind(&self) -> Tag {
        match self {
            CompileError::UnknownNodeKind { kind, .. }
            | CompileError::MalformedNode { kind, .. }
            | CompileError::UnsupportedConstruct { kind, .. }
            | CompileError::InvalidLiteral { kind, .. } => *kind,
        }
    }

    #[must_use]
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            CompileError::UnknownNodeKind { position, .. }
            | CompileError::MalformedNode { position, .. }
            | CompileError::UnsupportedConstruct { position, .. }
            | CompileError::InvalidLiteral { position, .. } => *position,
        }
    }

    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            CompileError::UnknownNodeKind { .. } => diagnostic_codes::UNKNOWN_NODE_KIND,
            CompileError::MalformedNode { .. } => diagnostic_codes::MALFORMED_NODE,
            CompileError::UnsupportedConstruct { .. } => diagnostic_codes::UNSUPPORTED_CONSTRUCT,
            CompileError::InvalidLiteral { .. } => diagnostic_codes::INVALID_LITERAL,
        }
    }

    /// Diagnostic for the external caller, naming node kind and position.
    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        Diagnostic::error(file, self.position(), self.to_string(), self.code())
    }
}
