//! garnet: Ruby to JavaScript code generation.
//!
//! The parser hands over a fully positioned [`AstNode`] tree; this crate
//! compiles it into JavaScript fragments, the set of runtime helpers the
//! output needs, and a source map.
//!
//! ```
//! use garnet::ast::build::{begin, int, lasgn, lvar, n};
//! use garnet::ast::Tag;
//! use garnet::{CompilerOptions, compile_unit};
//!
//! let root = begin([lasgn("r", n(Tag::Irange, [int(1), lvar("n")]))]);
//! let unit = compile_unit(&root, CompilerOptions::default()).unwrap();
//! assert_eq!(unit.code(), "r = $range(1, n, false)");
//! assert!(unit.helpers().contains("range"));
//! ```

pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};

pub use garnet_ast as ast;
pub use garnet_common as common;
pub use garnet_emitter as emitter;

pub use garnet_ast::{AstNode, Tag};
pub use garnet_common::Diagnostic;
pub use garnet_emitter::{
    CompileError, CompiledUnit, Compiler, CompilerOptions, Level, Registry, RegistryBuilder,
    ScopeKind,
};

/// Compile one unit at statement level.
///
/// Failures are returned as a diagnostic naming the node kind and position,
/// ready to be shown to the user.
pub fn compile_unit(root: &AstNode, options: CompilerOptions) -> Result<CompiledUnit, Diagnostic> {
    let file = options.file.clone();
    Compiler::new(options)
        .compile(root, Level::Statement)
        .map_err(|err| {
            tracing::debug!(%err, "unit failed");
            err.to_diagnostic(&file)
        })
}

/// Read a tree serialized by the parser (`{"kind": "...", "children": [...]}`).
pub fn parse_ast(json: &str) -> serde_json::Result<AstNode> {
    serde_json::from_str(json)
}
