//! Explicit returns and conditionals.

use crate::error::CompileResult;
use crate::fragment::FragmentBuffer;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Child};

/// `js_return` (inserted by the final-value rewrite) and source `return`.
pub struct ReturnNode;

impl NodeHandler for ReturnNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        match node.child(0) {
            None | Some(Child::Empty) => cx.push("return"),
            Some(Child::Node(value)) => {
                let value = cx.expr(value)?;
                cx.push(("return ", value));
            }
            Some(Child::Literal(_)) => return Err(cx.malformed("return value must be a node")),
        }
        Ok(())
    }
}

/// `if`/`unless`, as a statement or as a conditional expression.
pub struct IfNode;

impl NodeHandler for IfNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let cond = cx.child_node(node, 0, "condition")?;
        let then_branch = branch(node, 1, cx)?;
        let else_branch = branch(node, 2, cx)?;

        cx.helper("truthy");
        let cond = cx.expr(cond)?;

        if cx.is_stmt() {
            cx.push(("if ($truthy(", cond, ")) {"));
            if let Some(body) = then_branch {
                push_block_body(cx, body)?;
            }
            if let Some(body) = else_branch {
                cx.line("} else {");
                push_block_body(cx, body)?;
            }
            cx.line("}");
        } else {
            let then_value = value_or_nil(cx, then_branch)?;
            let else_value = value_or_nil(cx, else_branch)?;
            cx.push(("($truthy(", cond, ") ? ", then_value, " : ", else_value, ")"));
        }
        Ok(())
    }
}

fn branch<'n>(
    node: &'n AstNode,
    idx: usize,
    cx: &NodeCompiler<'_>,
) -> CompileResult<Option<&'n AstNode>> {
    match node.child(idx) {
        None | Some(Child::Empty) => Ok(None),
        Some(Child::Node(body)) => Ok(Some(body)),
        Some(Child::Literal(_)) => Err(cx.malformed(format!("branch {idx} must be a node"))),
    }
}

fn value_or_nil(cx: &mut NodeCompiler<'_>, body: Option<&AstNode>) -> CompileResult<FragmentBuffer> {
    match body {
        Some(body) => cx.expr(body),
        None => {
            let mut nil = FragmentBuffer::new();
            nil.push_text("nil", cx.origin());
            Ok(nil)
        }
    }
}

fn push_block_body(cx: &mut NodeCompiler<'_>, body: &AstNode) -> CompileResult<()> {
    let compiled = cx.stmt(body)?;
    if !compiled.is_empty() {
        cx.line(compiled);
        cx.terminate();
    }
    Ok(())
}
