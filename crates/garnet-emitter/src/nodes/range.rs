//! Range literals, built at runtime by the `range` helper.

use crate::error::CompileResult;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use garnet_ast::AstNode;

/// `a..b` and `a...b`; `exclusive` is registered per tag.
pub struct RangeNode {
    pub exclusive: bool,
}

impl NodeHandler for RangeNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        cx.children(node, 2)?;
        let start = cx.child_node(node, 0, "range start")?;
        let finish = cx.child_node(node, 1, "range end")?;

        cx.helper("range");
        let start = cx.expr(start)?;
        let finish = cx.expr(finish)?;
        let exclusive = if self.exclusive { "true" } else { "false" };
        cx.push(("$range(", start, ", ", finish, ", ", exclusive, ")"));
        Ok(())
    }
}
