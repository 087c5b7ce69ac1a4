//! Statement sequences, grouping, and the `alias` / `undef` directives.

use super::literal::string_literal;
use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::build::leaf;
use garnet_ast::{AstNode, Child, NodeFlags, Tag};

// =============================================================================
// Statement sequences
// =============================================================================

/// How a sequence whose value is needed is made into one expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceWrap {
    /// `(function() { ... })()`
    Function,
    /// `( ... )`
    Parens,
    /// No wrapping.
    Bare,
}

/// Final statements that cannot stand as a bare expression.
const FUNCTION_WRAPPED: &[Tag] = &[Tag::Return, Tag::JsReturn, Tag::Rescue, Tag::If];

/// Final statements that are never wrapped in parentheses alone.
const NO_PARENS: &[Tag] = &[
    Tag::If,
    Tag::Return,
    Tag::JsReturn,
    Tag::ReturnableYield,
    Tag::Rescue,
    Tag::Next,
];

/// Wrap decision for a sequence of `count` statements whose last statement
/// has kind `last`. Depends on nothing else.
#[must_use]
pub fn sequence_wrap(count: usize, flags: NodeFlags, last: Tag) -> SequenceWrap {
    if flags.contains(NodeFlags::FORCE_WRAP) || FUNCTION_WRAPPED.contains(&last) {
        SequenceWrap::Function
    } else if count == 1 && !NO_PARENS.contains(&last) {
        SequenceWrap::Parens
    } else {
        SequenceWrap::Bare
    }
}

/// `begin`, `kwbegin` and interpolation bodies.
pub struct BeginNode;

impl NodeHandler for BeginNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        if node.is_empty() {
            cx.push("nil");
            return Ok(());
        }

        let statements = node
            .children
            .iter()
            .enumerate()
            .map(|(idx, child)| {
                child
                    .as_node()
                    .ok_or_else(|| cx.malformed(format!("statement {idx} is not a node")))
            })
            .collect::<CompileResult<Vec<&AstNode>>>()?;

        // A lone `return x` is just `x` here.
        let unwrapped = match statements.as_slice() {
            [only] if only.kind == Tag::JsReturn => Some(match only.node_at(0) {
                Some(value) => value.clone(),
                None => leaf(Tag::Nil).with_position(only.position),
            }),
            _ => None,
        };
        let statements = match &unwrapped {
            Some(value) => vec![value],
            None => statements,
        };

        let last = statements[statements.len() - 1].kind;
        let wrap = sequence_wrap(statements.len(), node.flags, last);
        tracing::trace!(count = statements.len(), %last, ?wrap, "sequence");

        if node.has_flag(NodeFlags::INLINE_BLOCK) {
            for (idx, statement) in statements.iter().enumerate() {
                if idx > 0 {
                    cx.push(",");
                }
                let compiled = cx.expr(statement)?;
                cx.push(compiled);
            }
        } else if let [only] = statements.as_slice() {
            let compiled = match wrap {
                _ if cx.is_stmt() => cx.stmt(only)?,
                SequenceWrap::Function => cx.stmt(only)?,
                SequenceWrap::Parens => cx.expr(only)?,
                SequenceWrap::Bare => cx.same_level(only)?,
            };
            cx.push(compiled);
        } else {
            for statement in &statements {
                let compiled = cx.stmt(statement)?;
                let terminated = compiled.ends_with(";");
                cx.line(compiled);
                if !terminated {
                    cx.push(";");
                }
            }
        }

        if cx.is_stmt() {
            return Ok(());
        }
        match wrap {
            SequenceWrap::Function => cx.wrap("(function() {", "})()"),
            SequenceWrap::Parens => cx.wrap("(", ")"),
            SequenceWrap::Bare => {}
        }
        Ok(())
    }
}

// =============================================================================
// Grouping
// =============================================================================

/// `(a; b)` evaluates to a comma expression; `(x)` to its single body.
pub struct ParenNode;

impl NodeHandler for ParenNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let body = match node.child(0) {
            Some(Child::Node(body)) => Some(body),
            Some(Child::Empty) | None => None,
            Some(Child::Literal(_)) => return Err(cx.malformed("body must be a node")),
        };

        match body {
            Some(body) if body.kind == Tag::Begin && !body.is_empty() => {
                for (idx, child) in body.children.iter().enumerate() {
                    let child = child
                        .as_node()
                        .ok_or_else(|| cx.malformed(format!("element {idx} is not a node")))?;
                    if idx > 0 {
                        cx.push(", ");
                    }
                    let compiled = cx.expr(child)?;
                    cx.push(compiled);
                }
                cx.wrap("(", ")");
            }
            Some(body) => {
                let compiled = cx.same_level(body)?;
                cx.push(compiled);
                if !cx.is_stmt() {
                    cx.wrap("(", ")");
                }
            }
            None => {
                cx.push("nil");
                if !cx.is_stmt() {
                    cx.wrap("(", ")");
                }
            }
        }
        Ok(())
    }
}

/// Splat value: transparent.
pub struct SvalueNode;

impl NodeHandler for SvalueNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.children(node, 1)?;
        let value = cx.child_node(node, 0, "value")?;
        let compiled = cx.same_level(value)?;
        cx.push(compiled);
        Ok(())
    }
}

// =============================================================================
// Method table directives
// =============================================================================

/// `alias new old` registers `new` at runtime; inside a class or module
/// body it also counts as a method the body declares.
pub struct AliasNode;

impl NodeHandler for AliasNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.children(node, 2)?;
        let new_name = cx.name_at(node, 0, "new name")?;
        let old_name = cx.name_at(node, 1, "old name")?;

        let scope = cx.scope_mut();
        if scope.is_class() || scope.is_module() {
            scope.add_method(&new_name);
        }

        cx.push((
            "Opal.alias(self, ",
            string_literal(&new_name),
            ", ",
            string_literal(&old_name),
            ")",
        ));
        Ok(())
    }
}

/// `undef a, b`: one `Opal.udef` call per name, one per line.
pub struct UndefNode;

impl NodeHandler for UndefNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        if node.is_empty() {
            return Err(cx.malformed("expected at least one name"));
        }

        for (idx, child) in node.children.iter().enumerate() {
            let returned = match child {
                Child::Node(inner) if inner.kind == Tag::JsReturn => Some(inner),
                _ => None,
            };

            let (name, leading_return) = match returned {
                Some(ret) => {
                    let name = cx.name_at(ret, 0, "undefined name")?;
                    let bare_return = leaf(Tag::JsReturn).with_position(ret.position);
                    (name, Some((cx.expr(&bare_return)?, " ")))
                }
                None => (cx.name_at(node, idx, "undefined name")?, None),
            };

            let call = (
                leading_return,
                "Opal.udef(self, ",
                string_literal(&format!("${name}")),
                ");",
            );
            if idx == 0 {
                cx.push(call);
            } else {
                cx.line(call);
            }
        }
        Ok(())
    }
}
