//! Inline JavaScript (`` `...` `` and `%x{...}`).
//!
//! Text is passed through verbatim, one fragment per line so each line maps
//! back to its own source line.

use crate::error::CompileResult;
use crate::fragment::Fragment;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Child, Tag};
use garnet_common::SourcePosition;

pub struct XStringNode;

impl NodeHandler for XStringNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        for part in &node.children {
            match part {
                Child::Literal(lit) => {
                    let text = lit
                        .as_text()
                        .ok_or_else(|| cx.unsupported("numeric literal in xstring"))?;
                    push_split_lines(cx, text, node.position);
                }
                Child::Node(inner) => match inner.kind {
                    Tag::Str => {
                        let text = inner
                            .text_value()
                            .ok_or_else(|| cx.malformed("'str' segment without text"))?;
                        push_split_lines(cx, text, inner.position.or(node.position));
                    }
                    Tag::Evstr => {
                        let value = cx.child_node(inner, 0, "interpolated value")?;
                        let compiled = cx.expr(value)?;
                        cx.push(compiled);
                    }
                    Tag::Begin | Tag::KwBegin => {
                        let captured = cx.returns(inner)?;
                        let compiled = cx.expr(&captured)?;
                        cx.push(compiled);
                    }
                    Tag::Gvar | Tag::Ivar | Tag::Lvar => {
                        let compiled = cx.expr(inner)?;
                        cx.push(compiled);
                    }
                    other => {
                        return Err(cx.unsupported(format!("unsupported xstring part '{other}'")));
                    }
                },
                Child::Empty => return Err(cx.unsupported("empty xstring part")),
            }
        }

        if cx.is_stmt() && !cx.is_empty() && !cx.ends_with(";") {
            cx.push(";");
        }
        if cx.is_recv() {
            cx.wrap("(", ")");
        }
        Ok(())
    }
}

/// Push `text` one line at a time. The first line keeps `base`; line `i`
/// is attributed to the start of the `i`-th line below it.
fn push_split_lines(cx: &mut NodeCompiler<'_>, text: &str, base: Option<SourcePosition>) {
    let mut start = 0usize;
    let mut offset = 0u32;
    let bytes = text.as_bytes();

    loop {
        let end = match memchr::memchr(b'\n', &bytes[start..]) {
            Some(idx) => start + idx + 1,
            None => text.len(),
        };
        if start == end {
            break;
        }
        let origin = match offset {
            0 => base,
            _ => base.map(|pos| pos.line_below(offset)),
        };
        cx.push(Fragment::new(&text[start..end], origin));
        start = end;
        offset += 1;
    }
}
