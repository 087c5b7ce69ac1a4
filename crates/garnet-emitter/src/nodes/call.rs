//! Method calls.

use super::literal::string_literal;
use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Child};

/// `recv.meth(args)` compiles to `recv.$meth(args)`. Method names that are
/// not JavaScript identifiers use bracket access: `recv["$=~"](args)`.
pub struct SendNode;

impl NodeHandler for SendNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        if node.len() < 2 {
            return Err(cx.malformed(format!(
                "expected receiver and method name, found {} children",
                node.len()
            )));
        }
        let meth = cx.name_at(node, 1, "method name")?;

        match node.child(0) {
            Some(Child::Node(recv)) => {
                let recv = cx.recv(recv)?;
                cx.push(recv);
            }
            Some(Child::Empty) | None => cx.push("self"),
            Some(Child::Literal(_)) => return Err(cx.malformed("receiver must be a node")),
        }

        cx.push(mangle_method(&meth));
        cx.push("(");
        for (idx, arg) in node.children[2..].iter().enumerate() {
            let arg = arg
                .as_node()
                .ok_or_else(|| cx.malformed(format!("argument {idx} is not a node")))?;
            if idx > 0 {
                cx.push(", ");
            }
            let compiled = cx.expr(arg)?;
            cx.push(compiled);
        }
        cx.push(")");
        Ok(())
    }
}

/// Property access for the `$`-prefixed runtime method name.
#[must_use]
pub fn mangle_method(name: &str) -> String {
    let is_identifier = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_identifier {
        format!(".${name}")
    } else {
        format!("[{}]", string_literal(&format!("${name}")))
    }
}
