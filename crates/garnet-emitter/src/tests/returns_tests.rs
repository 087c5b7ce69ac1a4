use crate::compiler::Compiler;
use crate::options::CompilerOptions;
use crate::error::CompileError;
use garnet_ast::build::{begin, if_node, int, js_return, lvar, n, nil, s, str_lit};
use garnet_ast::{AstNode, Child, Literal, NodeFlags, Tag};

fn returns(node: &AstNode) -> AstNode {
    Compiler::new(CompilerOptions::default())
        .returns(node)
        .unwrap_or_else(|err| panic!("rewrite failed: {err}"))
}

fn nested_sequences(levels: usize) -> AstNode {
    let mut node = begin([lvar("a"), lvar("b")]);
    for _ in 0..levels {
        node = begin([node]);
    }
    node
}

#[test]
fn test_plain_value_is_wrapped() {
    assert_eq!(returns(&lvar("x")), js_return(Some(lvar("x"))));
}

#[test]
fn test_sequence_rewrites_last_statement_only() {
    let node = begin([lvar("a"), lvar("b")]);
    assert_eq!(
        returns(&node),
        begin([lvar("a"), js_return(Some(lvar("b")))])
    );
}

#[test]
fn test_empty_sequence_returns_nil() {
    assert_eq!(returns(&begin([])), begin([js_return(Some(nil()))]));
}

#[test]
fn test_sequence_keeps_flags_and_position() {
    let node = begin([lvar("a")])
        .with_flags(NodeFlags::FORCE_WRAP)
        .expect("begin accepts flags")
        .at(3, 1);
    let rewritten = returns(&node);
    assert_eq!(rewritten.flags, NodeFlags::FORCE_WRAP);
    assert_eq!(rewritten.position, node.position);
}

#[test]
fn test_conditional_rewrites_both_branches() {
    let node = if_node(lvar("c"), Some(int(1)), None);
    assert_eq!(
        returns(&node),
        if_node(
            lvar("c"),
            Some(js_return(Some(int(1)))),
            Some(js_return(Some(nil())))
        )
    );
}

#[test]
fn test_nested_sequences_recurse() {
    let node = begin([begin([lvar("a"), if_node(lvar("c"), Some(int(1)), Some(int(2)))])]);
    let expected = begin([begin([
        lvar("a"),
        if_node(
            lvar("c"),
            Some(js_return(Some(int(1)))),
            Some(js_return(Some(int(2)))),
        ),
    ])]);
    assert_eq!(returns(&node), expected);
}

#[test]
fn test_explicit_returns_are_unchanged() {
    let node = js_return(Some(lvar("x")));
    assert_eq!(returns(&node), node);
    let node = n(Tag::Return, [int(1)]);
    assert_eq!(returns(&node), node);
}

#[test]
fn test_xstring_with_return_is_unchanged() {
    let node = n(Tag::Xstr, [str_lit("return 1")]);
    assert_eq!(returns(&node), node);
    let literal = s(Tag::Xstr, [Child::Literal(Literal::Str("return x".into()))]);
    assert_eq!(returns(&literal), literal);
}

#[test]
fn test_xstring_without_return_is_wrapped() {
    let node = n(Tag::Xstr, [str_lit("1 + 1")]);
    assert_eq!(returns(&node), js_return(Some(node.clone())));
}

#[test]
fn test_input_is_not_modified() {
    let node = begin([lvar("a")]);
    let before = node.clone();
    let _ = returns(&node);
    assert_eq!(node, before);
}

#[test]
fn test_deep_last_statement_chain_is_rewritten_to_the_end() {
    let mut expected = begin([lvar("a"), js_return(Some(lvar("b")))]);
    for _ in 0..250 {
        expected = begin([expected]);
    }
    assert_eq!(returns(&nested_sequences(250)), expected);
}

#[test]
fn test_chain_deeper_than_depth_limit_fails() {
    let options = CompilerOptions {
        max_depth: 10,
        ..CompilerOptions::default()
    };
    let compiler = Compiler::new(options);

    assert!(compiler.returns(&nested_sequences(8)).is_ok());
    let err = compiler
        .returns(&nested_sequences(10))
        .expect_err("chain exceeds limit");
    assert!(
        matches!(err, CompileError::UnsupportedConstruct { kind: Tag::Begin, .. }),
        "unexpected error: {err}"
    );
}
