//! Node-dispatch JavaScript emitter.
//!
//! Walks a parsed program tree once, depth first, and produces JavaScript
//! text as a sequence of position-tagged fragments.
//!
//! # Architecture
//!
//! - [`registry`] maps node tags to handlers; built once, read-only.
//! - [`compiler::Compiler`] owns one unit's scope chain and dispatches nodes.
//! - [`handler::NodeCompiler`] is the per-invocation base every handler
//!   writes through (`push`, `line`, `wrap`, `expr`, `stmt`, `helper`, ...).
//! - [`nodes`] holds the handler families.
//!
//! ```
//! use garnet_ast::build::{dstr, evstr, lvar, str_lit};
//! use garnet_emitter::{Compiler, CompilerOptions, Level};
//!
//! let node = dstr([str_lit("a"), evstr(lvar("x")), str_lit("b")]);
//! let unit = Compiler::new(CompilerOptions::default())
//!     .compile(&node, Level::Expression)
//!     .unwrap();
//! assert_eq!(unit.code(), r#""" + "a" + (x) + "b""#);
//! ```

pub mod compiler;
pub mod context;
pub mod error;
pub mod fragment;
pub mod handler;
pub mod nodes;
pub mod options;
pub mod registry;
pub mod scope;
pub mod unit;

pub use compiler::Compiler;
pub use context::{CompileContext, Level};
pub use error::{CompileError, CompileResult};
pub use fragment::{Fragment, FragmentBuffer, IntoFragments};
pub use handler::NodeCompiler;
pub use options::CompilerOptions;
pub use registry::{NodeHandler, Registry, RegistryBuilder};
pub use scope::{Scope, ScopeChain, ScopeId, ScopeKind};
pub use unit::{CompiledUnit, Mapping};

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;

#[cfg(test)]
#[path = "tests/fragment_tests.rs"]
mod fragment_tests;

#[cfg(test)]
#[path = "tests/returns_tests.rs"]
mod returns_tests;
