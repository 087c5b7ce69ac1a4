//! Value, numeric, string and symbol literals.

use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Literal, Tag};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write as _;

/// `true`, `false`, `self`, `nil`. Safe in every position, never wrapped.
pub struct ValueNode;

impl NodeHandler for ValueNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let text = match node.kind {
            Tag::True => "true",
            Tag::False => "false",
            Tag::SelfRef => "self",
            Tag::Nil => "nil",
            other => return Err(cx.unsupported(format!("'{other}' is not a value literal"))),
        };
        cx.push(text);
        Ok(())
    }
}

/// Integer and float literals. `1.$foo()` does not parse, so a receiver is
/// parenthesized.
pub struct NumericNode;

impl NodeHandler for NumericNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let text = match node.literal_at(0) {
            Some(Literal::Int(value)) => value.to_string(),
            Some(Literal::Float(value)) => float_text(*value),
            _ => return Err(cx.malformed("expected a numeric literal child")),
        };
        cx.push(text);
        if cx.is_recv() {
            cx.wrap("(", ")");
        }
        Ok(())
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{value:?}")
    }
}

pub struct StringNode;

impl NodeHandler for StringNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let value = node
            .text_value()
            .ok_or_else(|| cx.malformed("expected a string literal child"))?;
        cx.push(string_literal(value));
        Ok(())
    }
}

/// Symbols compile to their name as a string.
pub struct SymbolNode;

impl NodeHandler for SymbolNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = cx.name_at(node, 0, "symbol name")?;
        cx.push(string_literal(&name));
        Ok(())
    }
}

// =============================================================================
// String literal form
// =============================================================================

/// JavaScript string literal for `value`.
///
/// Built from the source-language inspected form; the bell and escape
/// letters that form supports (`\a`, `\e`) have no JavaScript counterpart
/// and are rewritten to unicode escapes.
#[must_use]
pub fn string_literal(value: &str) -> String {
    translate_escape_chars(&inspect(value))
}

/// Double-quoted, backslash-escaped form of `value`.
#[must_use]
pub fn inspect(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            '\x0b' => out.push_str("\\v"),
            '\x08' => out.push_str("\\b"),
            '\x07' => out.push_str("\\a"),
            '\x1b' => out.push_str("\\e"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            '\u{2028}' | '\u{2029}' => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

static ESCAPE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\\+)([ae])").expect("escape letter pattern is valid"));

/// Rewrite `\a` and `\e` escapes. Only an odd backslash run escapes the
/// letter; an even run is a sequence of escaped backslashes and is kept.
#[must_use]
pub fn translate_escape_chars(inspected: &str) -> String {
    ESCAPE_LETTER
        .replace_all(inspected, |caps: &Captures<'_>| {
            let run = &caps[1];
            if run.len() % 2 == 0 {
                return caps[0].to_string();
            }
            let replacement = match &caps[2] {
                "a" => "\\u0007",
                _ => "\\u001b",
            };
            format!("{}{replacement}", &run[..run.len() - 1])
        })
        .into_owned()
}
