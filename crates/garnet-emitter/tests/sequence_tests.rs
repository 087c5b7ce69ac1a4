//! Statement-sequence compilation.

mod common;

use common::{compile, expr, recv, stmt};
use garnet_ast::build::{begin, if_node, int, js_return, lasgn, lvar, n, send};
use garnet_ast::{NodeFlags, Tag};
use garnet_emitter::Level;
use garnet_emitter::nodes::definitions::{SequenceWrap, sequence_wrap};

#[test]
fn test_empty_sequence_is_nil_at_every_level() {
    let node = begin([]);
    assert_eq!(expr(&node), "nil");
    assert_eq!(stmt(&node), "nil");
    assert_eq!(recv(&node), "nil");
}

#[test]
fn test_single_expression_gets_parens() {
    assert_eq!(expr(&begin([lvar("x")])), "(x)");
}

#[test]
fn test_single_statement_at_statement_level_is_not_wrapped() {
    assert_eq!(stmt(&begin([lvar("x")])), "x");
}

#[test]
fn test_single_return_is_unwrapped() {
    let node = begin([js_return(Some(lvar("x")))]);
    assert_eq!(expr(&node), "(x)");
}

#[test]
fn test_single_bare_return_unwraps_to_nil() {
    let node = begin([js_return(None)]);
    assert_eq!(expr(&node), "(nil)");
}

#[test]
fn test_single_conditional_uses_function_wrapper() {
    let node = begin([if_node(lvar("c"), Some(int(1)), Some(int(2)))]);
    let unit = compile(&node, Level::Expression);
    assert_eq!(
        unit.code(),
        "(function() {if ($truthy(c)) {\n1;\n} else {\n2;\n}})()"
    );
    assert!(unit.helpers().contains("truthy"));
}

#[test]
fn test_force_wrap_flag_uses_function_wrapper() {
    let node = begin([lvar("x")])
        .with_flags(NodeFlags::FORCE_WRAP)
        .expect("begin accepts flags");
    assert_eq!(expr(&node), "(function() {x})()");
}

#[test]
fn test_force_wrap_is_ignored_at_statement_level() {
    let node = begin([lvar("x")])
        .with_flags(NodeFlags::FORCE_WRAP)
        .expect("begin accepts flags");
    assert_eq!(stmt(&node), "x");
}

#[test]
fn test_statements_are_terminated_and_ordered() {
    let node = begin([
        lasgn("a", int(1)),
        send(None, "puts", [lvar("a")]),
        send(None, "exit", []),
    ]);
    let unit = compile(&node, Level::Statement);
    assert_eq!(unit.code(), "a = 1;\nself.$puts(a);\nself.$exit();");
    assert!(unit.locals().contains("a"));
}

#[test]
fn test_multi_statement_expression_with_safe_tail_is_bare() {
    let node = begin([lasgn("a", int(1)), lvar("a")]);
    assert_eq!(expr(&node), "a = 1;\na;");
}

#[test]
fn test_multi_statement_ending_in_return_uses_function_wrapper() {
    let node = begin([lasgn("a", int(1)), js_return(Some(lvar("a")))]);
    assert_eq!(expr(&node), "(function() {a = 1;\nreturn a;})()");
}

#[test]
fn test_inline_block_joins_with_commas() {
    let node = begin([int(1), int(2)])
        .with_flags(NodeFlags::INLINE_BLOCK)
        .expect("begin accepts flags");
    assert_eq!(expr(&node), "1,2");
}

#[test]
fn test_kwbegin_behaves_like_begin() {
    assert_eq!(expr(&n(Tag::KwBegin, [lvar("x")])), "(x)");
    assert_eq!(expr(&n(Tag::KwBegin, [])), "nil");
}

#[test]
fn test_nested_sequences() {
    let node = begin([begin([lvar("x")])]);
    assert_eq!(expr(&node), "((x))");
}

#[test]
fn test_wrap_decision_table() {
    let none = NodeFlags::empty();
    assert_eq!(sequence_wrap(1, none, Tag::Lvar), SequenceWrap::Parens);
    assert_eq!(sequence_wrap(1, none, Tag::Send), SequenceWrap::Parens);
    assert_eq!(sequence_wrap(1, none, Tag::If), SequenceWrap::Function);
    assert_eq!(sequence_wrap(1, none, Tag::Return), SequenceWrap::Function);
    assert_eq!(sequence_wrap(1, none, Tag::JsReturn), SequenceWrap::Function);
    assert_eq!(sequence_wrap(1, none, Tag::Rescue), SequenceWrap::Function);
    assert_eq!(sequence_wrap(1, none, Tag::Next), SequenceWrap::Bare);
    assert_eq!(sequence_wrap(1, none, Tag::ReturnableYield), SequenceWrap::Bare);
    assert_eq!(sequence_wrap(3, none, Tag::Lvar), SequenceWrap::Bare);
    assert_eq!(sequence_wrap(3, none, Tag::If), SequenceWrap::Function);
    assert_eq!(
        sequence_wrap(2, NodeFlags::FORCE_WRAP, Tag::Lvar),
        SequenceWrap::Function
    );
}
