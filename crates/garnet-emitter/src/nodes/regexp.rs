//! Regular expression literals.
//!
//! Patterns compile to `new RegExp(pattern, 'flags')`. The pattern is an
//! ordinary (possibly interpolated) string expression, so the flag carrier is
//! the only part that needs regexp-specific treatment.

use super::dynamic::push_segments;
use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::build::{gvar, send, str_lit};
use garnet_ast::{AstNode, Child, Literal, Tag};

/// Flag letter for free-spacing mode. JavaScript has no equivalent, so the
/// pattern is rewritten at compile time and the letter is dropped.
const EXTENDED: char = 'x';

pub struct RegexpNode;

impl NodeHandler for RegexpNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let Some((Child::Node(opts), parts)) = node.children.split_last() else {
            return Err(cx.malformed("missing trailing regopt child"));
        };
        if opts.kind != Tag::RegOpt {
            return Err(cx.malformed(format!(
                "last child must be 'regopt', found '{}'",
                opts.kind
            )));
        }
        let mut flags = regopt_flags(opts, cx)?;

        let mut value = match parts {
            [] => str_lit("").with_position(node.position),
            [Child::Node(single)] => single.clone(),
            [Child::Literal(lit)] => {
                let text = lit
                    .as_text()
                    .ok_or_else(|| cx.malformed("numeric literal in regexp pattern"))?;
                str_lit(text).with_position(node.position)
            }
            _ => node.updated(Some(Tag::Dstr), parts.to_vec()),
        };

        if let Some(idx) = flags.iter().position(|&c| c == EXTENDED) {
            flags.remove(idx);
            value = strip_extended_node(&value);
        }

        if final_literal(&value).is_some_and(ends_with_lone_backslash) {
            return Err(cx.invalid_literal("too short escape sequence"));
        }

        let pattern = cx.expr(&value)?;
        let flags: String = flags.into_iter().collect();
        cx.push(("new RegExp(", pattern, ", '", flags, "')"));
        Ok(())
    }
}

/// Interpolated regexp: segments are joined like an interpolated string and
/// handed to the `RegExp` constructor. An optional trailing `regopt` child
/// supplies the flags.
pub struct DynamicRegexpNode;

impl NodeHandler for DynamicRegexpNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let (flags, parts) = match node.children.split_last() {
            Some((Child::Node(opts), parts)) if opts.kind == Tag::RegOpt => {
                (regopt_flags(opts, cx)?, parts)
            }
            _ => (Vec::new(), node.children.as_slice()),
        };

        let extended = flags.contains(&EXTENDED);
        let stripped: Vec<Child>;
        let parts = if extended {
            stripped = parts.iter().map(strip_extended_part).collect();
            stripped.as_slice()
        } else {
            parts
        };

        push_segments(cx, parts, " + ")?;

        let flags: String = flags.into_iter().filter(|&c| c != EXTENDED).collect();
        if flags.is_empty() {
            cx.wrap("(new RegExp(", "))");
        } else {
            cx.wrap("(new RegExp(", &format!(", '{flags}'))"));
        }
        Ok(())
    }
}

/// `if /foo/` tests the last read line: `$_ =~ /foo/`.
pub struct MatchCurrentLineNode;

impl NodeHandler for MatchCurrentLineNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let regexp = cx.child_node(node, 0, "regexp")?;
        let receiver = gvar("$_").with_position(node.position);
        let call = send(Some(receiver), "=~", [regexp.clone()]).with_position(node.position);
        let compiled = cx.expr(&call)?;
        cx.push(compiled);
        Ok(())
    }
}

// =============================================================================
// Flags and pattern text
// =============================================================================

fn regopt_flags(opts: &AstNode, cx: &NodeCompiler<'_>) -> CompileResult<Vec<char>> {
    opts.children
        .iter()
        .map(|child| {
            let letter = match child {
                Child::Literal(Literal::Name(name)) => {
                    let mut chars = name.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
                        _ => None,
                    }
                }
                _ => None,
            };
            letter.ok_or_else(|| cx.malformed("regopt children must be single flag letters"))
        })
        .collect()
}

/// Apply free-spacing stripping to a `str` node, or to every literal segment
/// of a `dstr` node. Other nodes are returned unchanged.
fn strip_extended_node(node: &AstNode) -> AstNode {
    match node.kind {
        Tag::Str => match node.text_value() {
            Some(text) => {
                let stripped = Literal::Str(strip_extended(text));
                node.updated(None, vec![Child::Literal(stripped)])
            }
            None => node.clone(),
        },
        Tag::Dstr => {
            let parts = node.children.iter().map(strip_extended_part).collect();
            node.updated(None, parts)
        }
        _ => node.clone(),
    }
}

/// Strip one pattern segment: bare text and `str` nodes are rewritten,
/// interpolated values are left alone.
fn strip_extended_part(part: &Child) -> Child {
    match part {
        Child::Literal(Literal::Str(text)) => Child::Literal(Literal::Str(strip_extended(text))),
        Child::Literal(Literal::Name(text)) => Child::Literal(Literal::Name(strip_extended(text))),
        Child::Node(inner) if inner.kind == Tag::Str => Child::Node(strip_extended_node(inner)),
        other => other.clone(),
    }
}

/// Remove `#` comments (to end of line) and unescaped whitespace.
///
/// Escaped characters are kept with their backslash, and inside a character
/// class both whitespace and `#` are literal.
#[must_use]
pub fn strip_extended(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                out.push(ch);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' => {
                in_class = true;
                out.push(ch);
            }
            ']' if in_class => {
                in_class = false;
                out.push(ch);
            }
            _ if in_class => out.push(ch),
            '#' => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            c if c.is_whitespace() => {}
            c => out.push(c),
        }
    }
    out
}

/// Text of the last literal segment of a pattern value.
fn final_literal(value: &AstNode) -> Option<&str> {
    match value.kind {
        Tag::Str => value.text_value(),
        Tag::Dstr => match value.children.last()? {
            Child::Literal(lit) => lit.as_text(),
            Child::Node(part) if part.kind == Tag::Str => part.text_value(),
            _ => None,
        },
        _ => None,
    }
}

fn ends_with_lone_backslash(text: &str) -> bool {
    let run = text.bytes().rev().take_while(|&b| b == b'\\').count();
    run % 2 == 1
}
