//! Diagnostic types handed to the external caller.
//!
//! The emitter never renders diagnostics itself: a failed unit produces one
//! `Diagnostic` that the surrounding toolchain formats however it likes.

use crate::position::SourcePosition;
use serde::Serialize;
use std::fmt;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
///
/// Emitter failures are always errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error = 1,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// Numeric codes for emitter failures.
pub mod diagnostic_codes {
    pub const UNKNOWN_NODE_KIND: u32 = 9001;
    pub const MALFORMED_NODE: u32 = 9002;
    pub const UNSUPPORTED_CONSTRUCT: u32 = 9003;
    pub const INVALID_LITERAL: u32 = 9004;
}

/// A single compilation diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        position: Option<SourcePosition>,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            file: file.into(),
            position,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(f, "{}:{}", self.file, pos)?,
            None => write!(f, "{}", self.file)?,
        }
        write!(
            f,
            " - {} G{}: {}",
            self.category, self.code, self.message_text
        )
    }
}
