//! Shared helpers for emitter integration tests.
#![allow(dead_code)]

use garnet_ast::AstNode;
use garnet_emitter::{CompileError, CompiledUnit, Compiler, CompilerOptions, Level, ScopeKind};

pub fn compile(node: &AstNode, level: Level) -> CompiledUnit {
    Compiler::new(CompilerOptions::default())
        .compile(node, level)
        .unwrap_or_else(|err| panic!("compilation failed: {err}"))
}

pub fn compile_in(node: &AstNode, level: Level, scope: ScopeKind) -> CompiledUnit {
    Compiler::new(CompilerOptions::default().with_unit_scope(scope))
        .compile(node, level)
        .unwrap_or_else(|err| panic!("compilation failed: {err}"))
}

pub fn expr(node: &AstNode) -> String {
    compile(node, Level::Expression).code()
}

pub fn stmt(node: &AstNode) -> String {
    compile(node, Level::Statement).code()
}

pub fn recv(node: &AstNode) -> String {
    compile(node, Level::Receiver).code()
}

pub fn compile_err(node: &AstNode, level: Level) -> CompileError {
    match Compiler::new(CompilerOptions::default()).compile(node, level) {
        Ok(unit) => panic!("expected failure, got {:?}", unit.code()),
        Err(err) => err,
    }
}

/// Evaluate a JavaScript double-quoted string literal.
pub fn js_string_value(literal: &str) -> String {
    let inner = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or_else(|| panic!("not a double-quoted literal: {literal}"));

    let mut out = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = chars.next().expect("dangling backslash");
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'f' => out.push('\x0c'),
            'v' => out.push('\x0b'),
            'b' => out.push('\x08'),
            '0' => out.push('\0'),
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                let code = u32::from_str_radix(&hex, 16).expect("bad \\x escape");
                out.push(char::from_u32(code).expect("bad code point"));
            }
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16).expect("bad \\u escape");
                out.push(char::from_u32(code).expect("bad code point"));
            }
            // Identity escapes: \" \\ \# ...
            other => out.push(other),
        }
    }
    out
}
