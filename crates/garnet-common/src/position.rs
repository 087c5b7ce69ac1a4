//! Source positions.
//!
//! Positions are produced by the parsing collaborator and travel unchanged
//! through the emitter until they end up in the source map. Lines are
//! 1-based (as reported by the parser), columns are 0-based.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column location in the original source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column.
    pub column: u32,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position at the start of the line `offset` lines below this one.
    ///
    /// Used when one node spans several emitted lines and each line needs
    /// its own origin.
    #[must_use]
    pub const fn line_below(self, offset: u32) -> Self {
        Self {
            line: self.line.saturating_add(offset),
            column: 0,
        }
    }

    /// 0-based line, as written into source maps.
    #[must_use]
    pub const fn zero_based_line(self) -> u32 {
        self.line.saturating_sub(1)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
