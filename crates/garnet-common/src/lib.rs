//! Common types and utilities for the garnet compiler.
//!
//! This crate provides foundational types used across all garnet crates:
//! - Source positions (`SourcePosition`)
//! - Compiler limits and thresholds
//! - Diagnostics handed to the external caller
//! - Source map generation (`vlq`, `SourceMapGenerator`)

// Line/column positions attached to AST nodes and emitted fragments
pub mod position;
pub use position::SourcePosition;

// Centralized limits and thresholds
pub mod limits;

// Diagnostic types for reporting compilation failures
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Source Map generation
pub mod source_map;
pub use source_map::SourceMapGenerator;

#[cfg(test)]
#[path = "tests/source_map_tests.rs"]
mod source_map_tests;

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
