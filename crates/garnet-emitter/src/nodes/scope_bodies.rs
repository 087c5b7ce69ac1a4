//! `module` and `class` bodies.
//!
//! Each body runs inside its own scope and compiles to a self-invoking
//! function that receives the enclosing `self` as `$base`:
//!
//! ```text
//! (function($base) {
//! var self = $module($base, "Foo"), a = nil;
//! ...
//! })(self)
//! ```

use super::literal::string_literal;
use crate::error::CompileResult;
use crate::fragment::FragmentBuffer;
use crate::handler::NodeCompiler;
use crate::registry::NodeHandler;
use crate::scope::ScopeKind;
use garnet_ast::{AstNode, Child, Tag};

pub struct ModuleNode;

impl NodeHandler for ModuleNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = const_name(node, cx)?;
        let body = optional_node(node, 1, cx)?;

        cx.helper("module");
        let (body, locals) = compile_body(cx, ScopeKind::Module, body)?;

        cx.push("(function($base) {");
        cx.line((
            "var self = $module($base, ",
            string_literal(&name),
            ")",
            locals,
            ";",
        ));
        if !body.is_empty() {
            cx.line(body);
        }
        cx.line("})(self)");
        Ok(())
    }
}

pub struct ClassNode;

impl NodeHandler for ClassNode {
    fn compile(&self, node: &AstNode, cx: &mut NodeCompiler<'_>) -> CompileResult<()> {
        let name = const_name(node, cx)?;
        let superclass = optional_node(node, 1, cx)?;
        let body = optional_node(node, 2, cx)?;

        cx.helper("klass");
        let superclass = match superclass {
            Some(superclass) => cx.expr(superclass)?,
            None => {
                let mut null = FragmentBuffer::new();
                null.push_text("null", cx.origin());
                null
            }
        };
        let (body, locals) = compile_body(cx, ScopeKind::Class, body)?;

        cx.push("(function($base, $super) {");
        cx.line((
            "var self = $klass($base, $super, ",
            string_literal(&name),
            ")",
            locals,
            ";",
        ));
        if !body.is_empty() {
            cx.line(body);
        }
        cx.line(("})(self, ", superclass, ")"));
        Ok(())
    }
}

fn const_name(node: &AstNode, cx: &NodeCompiler<'_>) -> CompileResult<String> {
    let name_node = cx.child_node(node, 0, "name")?;
    if name_node.kind != Tag::Const {
        return Err(cx.malformed(format!(
            "name must be a 'const' node, found '{}'",
            name_node.kind
        )));
    }
    cx.name_at(name_node, 1, "constant name")
}

fn optional_node<'n>(
    node: &'n AstNode,
    idx: usize,
    cx: &NodeCompiler<'_>,
) -> CompileResult<Option<&'n AstNode>> {
    match node.child(idx) {
        None | Some(Child::Empty) => Ok(None),
        Some(Child::Node(inner)) => Ok(Some(inner)),
        Some(Child::Literal(_)) => Err(cx.malformed(format!("child {idx} must be a node"))),
    }
}

/// Compile `body` at statement level in a fresh scope of `kind`. Returns
/// the body and the `, a = nil` declarations for the locals it assigned.
fn compile_body(
    cx: &mut NodeCompiler<'_>,
    kind: ScopeKind,
    body: Option<&AstNode>,
) -> CompileResult<(FragmentBuffer, String)> {
    cx.in_scope(kind, |cx| {
        let mut compiled = match body {
            Some(body) => cx.stmt(body)?,
            None => FragmentBuffer::new(),
        };
        if !compiled.is_empty() && !compiled.ends_with(";") && !compiled.ends_with("}") {
            compiled.push_text(";", body.and_then(|b| b.position));
        }
        let locals: String = cx
            .scope()
            .locals
            .iter()
            .map(|local| format!(", {local} = nil"))
            .collect();
        Ok((compiled, locals))
    })
}
