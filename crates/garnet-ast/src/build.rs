//! Node construction helpers.
//!
//! These mirror the parser's s-expression constructors so trees can be
//! written compactly:
//!
//! ```
//! use garnet_ast::build::{dstr, evstr, lvar, str_lit};
//! let node = dstr([str_lit("a"), evstr(lvar("x")), str_lit("b")]);
//! assert_eq!(node.len(), 3);
//! ```

use crate::node::{AstNode, Child, Literal};
use crate::tag::Tag;

/// Node with arbitrary children.
pub fn s(kind: Tag, children: impl IntoIterator<Item = Child>) -> AstNode {
    AstNode::new(kind, children)
}

/// Node whose children are all nodes.
pub fn n(kind: Tag, nodes: impl IntoIterator<Item = AstNode>) -> AstNode {
    AstNode::new(kind, nodes.into_iter().map(Child::Node))
}

/// Leaf node with no children (`true`, `nil`, `self`, bare `js_return`).
#[must_use]
pub fn leaf(kind: Tag) -> AstNode {
    AstNode::new(kind, [])
}

pub fn name(text: impl Into<String>) -> Child {
    Child::Literal(Literal::Name(text.into()))
}

#[must_use]
pub fn nil() -> AstNode {
    leaf(Tag::Nil)
}

#[must_use]
pub fn int(value: i64) -> AstNode {
    s(Tag::Int, [Child::Literal(Literal::Int(value))])
}

#[must_use]
pub fn float(value: f64) -> AstNode {
    s(Tag::Float, [Child::Literal(Literal::Float(value))])
}

pub fn str_lit(value: impl Into<String>) -> AstNode {
    s(Tag::Str, [Child::Literal(Literal::Str(value.into()))])
}

pub fn sym(value: impl Into<String>) -> AstNode {
    s(Tag::Sym, [name(value)])
}

pub fn lvar(ident: impl Into<String>) -> AstNode {
    s(Tag::Lvar, [name(ident)])
}

pub fn lasgn(ident: impl Into<String>, value: AstNode) -> AstNode {
    s(Tag::Lasgn, [name(ident), Child::Node(value)])
}

pub fn ivar(ident: impl Into<String>) -> AstNode {
    s(Tag::Ivar, [name(ident)])
}

pub fn gvar(ident: impl Into<String>) -> AstNode {
    s(Tag::Gvar, [name(ident)])
}

pub fn begin(statements: impl IntoIterator<Item = AstNode>) -> AstNode {
    n(Tag::Begin, statements)
}

/// Interpolated segment `#{value}`, represented as a one-statement sequence.
#[must_use]
pub fn evstr(value: AstNode) -> AstNode {
    n(Tag::Begin, [value])
}

pub fn dstr(parts: impl IntoIterator<Item = AstNode>) -> AstNode {
    n(Tag::Dstr, parts)
}

#[must_use]
pub fn js_return(value: Option<AstNode>) -> AstNode {
    s(Tag::JsReturn, value.map(Child::Node))
}

/// Method call: `recv.meth(args)`; `None` receiver means implicit self.
pub fn send(
    recv: Option<AstNode>,
    meth: impl Into<String>,
    args: impl IntoIterator<Item = AstNode>,
) -> AstNode {
    let mut children = vec![Child::from(recv), name(meth)];
    children.extend(args.into_iter().map(Child::Node));
    s(Tag::Send, children)
}

#[must_use]
pub fn if_node(cond: AstNode, then_branch: Option<AstNode>, else_branch: Option<AstNode>) -> AstNode {
    s(
        Tag::If,
        [
            Child::Node(cond),
            Child::from(then_branch),
            Child::from(else_branch),
        ],
    )
}

/// Regexp flag carrier, one name per letter of `flags`.
#[must_use]
pub fn regopt(flags: &str) -> AstNode {
    s(Tag::RegOpt, flags.chars().map(|c| name(c.to_string())))
}

/// Static regexp: pattern segments followed by the flag carrier.
pub fn regexp(parts: impl IntoIterator<Item = AstNode>, flags: &str) -> AstNode {
    let mut children: Vec<Child> = parts.into_iter().map(Child::Node).collect();
    children.push(Child::Node(regopt(flags)));
    s(Tag::Regexp, children)
}

pub fn const_ref(ident: impl Into<String>) -> AstNode {
    s(Tag::Const, [Child::Empty, name(ident)])
}
