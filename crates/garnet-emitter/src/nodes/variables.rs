//! Variable reads and local assignment.

use super::literal::string_literal;
use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::{AstNode, Child};

pub struct LocalVariableNode;

impl NodeHandler for LocalVariableNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = cx.name_at(node, 0, "variable name")?;
        cx.push(name);
        Ok(())
    }
}

/// `a = value`. The name becomes a local of the active scope, declared by
/// whoever emits that scope's `var` line.
pub struct LocalAssignNode;

impl NodeHandler for LocalAssignNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.children(node, 2)?;
        let name = cx.name_at(node, 0, "variable name")?;
        let value = cx.child_node(node, 1, "assigned value")?;

        cx.scope_mut().add_local(&name);
        let value = cx.expr(value)?;
        cx.push((name, " = ", value));
        if cx.is_recv() {
            cx.wrap("(", ")");
        }
        Ok(())
    }
}

/// `@name` reads `self.name`.
pub struct InstanceVariableNode;

impl NodeHandler for InstanceVariableNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = cx.name_at(node, 0, "instance variable name")?;
        cx.push(("self.", name.trim_start_matches('@')));
        Ok(())
    }
}

/// `$name` reads through the runtime's global table.
pub struct GlobalVariableNode;

impl NodeHandler for GlobalVariableNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = cx.name_at(node, 0, "global variable name")?;
        cx.helper("gvars");
        let key = string_literal(name.strip_prefix('$').unwrap_or(&name));
        cx.push(("$gvars[", key, "]"));
        Ok(())
    }
}

/// Unscoped constant lookup.
pub struct ConstNode;

impl NodeHandler for ConstNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.children(node, 2)?;
        if !matches!(node.child(0), Some(Child::Empty)) {
            return Err(cx.unsupported("scoped constant lookup"));
        }
        let name = cx.name_at(node, 1, "constant name")?;
        cx.push(("$scope.get(", string_literal(&name), ")"));
        Ok(())
    }
}
