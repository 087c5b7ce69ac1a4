//! Interpolated strings and symbols.

use super::literal::string_literal;
use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Child, Tag};

/// `"a#{x}b"` compiles to `"" + "a" + (x) + "b"`.
pub struct DynamicStringNode;

impl NodeHandler for DynamicStringNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.push("\"\"");
        for part in &node.children {
            cx.push(" + ");
            push_segment(cx, part)?;
        }
        if cx.is_recv() {
            cx.wrap("(", ")");
        }
        Ok(())
    }
}

/// `:"a#{x}"` compiles to its string form, always parenthesized.
pub struct DynamicSymbolNode;

impl NodeHandler for DynamicSymbolNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        for (idx, part) in node.children.iter().enumerate() {
            let supported = match part {
                Child::Literal(lit) => lit.as_text().is_some(),
                Child::Node(inner) => matches!(
                    inner.kind,
                    Tag::Str | Tag::Begin | Tag::KwBegin | Tag::Evstr
                ),
                Child::Empty => false,
            };
            if !supported {
                return Err(cx.malformed(format!("bad dsym part at {idx}")));
            }
            if idx > 0 {
                cx.push(" + ");
            }
            push_segment(cx, part)?;
        }
        cx.wrap("(", ")");
        Ok(())
    }
}

// =============================================================================
// Segments
// =============================================================================

/// Push one interpolation segment.
///
/// Literal text becomes a string literal. An interpolated sequence is
/// compiled through the final-value rewrite, which already parenthesizes
/// it; any other node is parenthesized here.
pub(crate) fn push_segment(cx: &mut NodeCompiler<'_>, part: &Child) -> CompileResult<()> {
    match part {
        Child::Literal(lit) => {
            let text = lit
                .as_text()
                .ok_or_else(|| cx.malformed("numeric literal in string segment"))?;
            cx.push(string_literal(text));
        }
        Child::Node(inner) if inner.kind == Tag::Str => {
            let text = inner
                .text_value()
                .ok_or_else(|| cx.malformed("'str' segment without text"))?;
            cx.push(string_literal(text));
        }
        Child::Node(inner) if matches!(inner.kind, Tag::Begin | Tag::KwBegin | Tag::Evstr) => {
            let captured = cx.returns(inner)?;
            let compiled = cx.expr(&captured)?;
            cx.push(compiled);
        }
        Child::Node(inner) => {
            let compiled = cx.expr(inner)?;
            cx.push(("(", compiled, ")"));
        }
        Child::Empty => return Err(cx.malformed("empty interpolation segment")),
    }
    Ok(())
}

/// Push every segment, separated by `separator`.
pub(crate) fn push_segments(
    cx: &mut NodeCompiler<'_>,
    parts: &[Child],
    separator: &str,
) -> CompileResult<()> {
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            cx.push(separator);
        }
        push_segment(cx, part)?;
    }
    Ok(())
}
