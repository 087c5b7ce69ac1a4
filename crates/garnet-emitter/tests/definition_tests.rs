//! Grouping, `alias`, `undef`, and module/class bodies.

mod common;

use common::{compile, compile_err, compile_in, expr, stmt};
use garnet_ast::build::{begin, const_ref, int, js_return, lasgn, lvar, n, name, s, send, sym};
use garnet_ast::{Child, Tag};
use garnet_emitter::{CompileError, Level, ScopeKind};

fn alias(new_name: &str, old_name: &str) -> garnet_ast::AstNode {
    n(Tag::Alias, [sym(new_name), sym(old_name)])
}

// =============================================================================
// alias
// =============================================================================

#[test]
fn test_alias_in_class_scope_declares_method() {
    let unit = compile_in(&alias("foo", "bar"), Level::Statement, ScopeKind::Class);
    assert_eq!(unit.code(), r#"Opal.alias(self, "foo", "bar")"#);
    assert_eq!(unit.declared_method_names(), ["foo"]);
    assert_eq!(unit.code().matches("Opal.alias").count(), 1);
}

#[test]
fn test_alias_in_module_scope_declares_method() {
    let unit = compile_in(&alias("to_s", "inspect"), Level::Statement, ScopeKind::Module);
    assert_eq!(unit.declared_method_names(), ["to_s"]);
}

#[test]
fn test_alias_in_method_scope_declares_nothing() {
    let unit = compile_in(&alias("foo", "bar"), Level::Statement, ScopeKind::Method);
    assert_eq!(unit.code(), r#"Opal.alias(self, "foo", "bar")"#);
    assert!(unit.declared_method_names().is_empty());
}

#[test]
fn test_alias_accepts_bare_names() {
    let node = s(Tag::Alias, [name("a?"), name("b!")]);
    assert_eq!(stmt(&node), r#"Opal.alias(self, "a?", "b!")"#);
}

#[test]
fn test_alias_requires_two_names() {
    let err = compile_err(&n(Tag::Alias, [sym("only")]), Level::Statement);
    assert!(
        matches!(err, CompileError::MalformedNode { kind: Tag::Alias, .. }),
        "unexpected error: {err:?}"
    );

    let err = compile_err(&n(Tag::Alias, [sym("a"), int(1)]), Level::Statement);
    assert!(matches!(err, CompileError::MalformedNode { .. }), "{err:?}");
}

// =============================================================================
// undef
// =============================================================================

#[test]
fn test_undef_single_name() {
    let node = n(Tag::Undef, [sym("foo")]);
    assert_eq!(stmt(&node), r#"Opal.udef(self, "$foo");"#);
}

#[test]
fn test_undef_emits_one_call_per_line() {
    let node = n(Tag::Undef, [sym("a"), sym("b"), sym("c")]);
    assert_eq!(
        stmt(&node),
        "Opal.udef(self, \"$a\");\nOpal.udef(self, \"$b\");\nOpal.udef(self, \"$c\");"
    );
}

#[test]
fn test_undef_unwraps_return_marker() {
    let node = n(Tag::Undef, [js_return(Some(sym("foo")))]);
    assert_eq!(stmt(&node), r#"return Opal.udef(self, "$foo");"#);
}

#[test]
fn test_undef_requires_a_name() {
    let err = compile_err(&n(Tag::Undef, []), Level::Statement);
    assert!(matches!(err, CompileError::MalformedNode { kind: Tag::Undef, .. }), "{err:?}");
}

// =============================================================================
// paren / svalue
// =============================================================================

#[test]
fn test_paren_single_body() {
    let node = n(Tag::Paren, [lvar("x")]);
    assert_eq!(expr(&node), "(x)");
    assert_eq!(stmt(&node), "x");
}

#[test]
fn test_paren_multi_body_is_comma_expression() {
    let node = n(Tag::Paren, [begin([lasgn("a", int(1)), lvar("a")])]);
    assert_eq!(expr(&node), "(a = 1, a)");
    assert_eq!(stmt(&node), "(a = 1, a)");
}

#[test]
fn test_empty_paren_is_nil() {
    assert_eq!(expr(&s(Tag::Paren, [Child::Empty])), "(nil)");
}

#[test]
fn test_svalue_is_transparent() {
    let node = n(Tag::Svalue, [lvar("x")]);
    assert_eq!(expr(&node), "x");
    assert_eq!(
        expr(&send(Some(n(Tag::Svalue, [int(5)])), "succ", [])),
        "(5).$succ()"
    );
}

// =============================================================================
// module / class
// =============================================================================

#[test]
fn test_module_body() {
    let node = s(
        Tag::Module,
        [
            Child::Node(const_ref("Foo")),
            Child::Node(begin([lasgn("a", int(1)), alias("x", "y")])),
        ],
    );
    let unit = compile(&node, Level::Statement);
    assert_eq!(
        unit.code(),
        "(function($base) {\n\
         var self = $module($base, \"Foo\"), a = nil;\n\
         a = 1;\n\
         Opal.alias(self, \"x\", \"y\");\n\
         })(self)"
    );
    assert!(unit.helpers().contains("module"));
    // Locals and methods of the body stay inside the module scope
    assert!(unit.locals().is_empty());
    assert!(unit.declared_method_names().is_empty());
}

#[test]
fn test_class_body_with_superclass() {
    let node = s(
        Tag::Class,
        [
            Child::Node(const_ref("Bar")),
            Child::Node(const_ref("Base")),
            Child::Node(send(None, "attr", [sym("x")])),
        ],
    );
    let unit = compile(&node, Level::Statement);
    assert_eq!(
        unit.code(),
        "(function($base, $super) {\n\
         var self = $klass($base, $super, \"Bar\");\n\
         self.$attr(\"x\");\n\
         })(self, $scope.get(\"Base\"))"
    );
    assert!(unit.helpers().contains("klass"));
}

#[test]
fn test_class_without_superclass_or_body() {
    let node = s(
        Tag::Class,
        [Child::Node(const_ref("Empty")), Child::Empty, Child::Empty],
    );
    assert_eq!(
        stmt(&node),
        "(function($base, $super) {\nvar self = $klass($base, $super, \"Empty\");\n})(self, null)"
    );
}

#[test]
fn test_helpers_bubble_out_of_class_scope() {
    let node = s(
        Tag::Class,
        [
            Child::Node(const_ref("R")),
            Child::Empty,
            Child::Node(n(Tag::Irange, [int(1), int(2)])),
        ],
    );
    let unit = compile(&node, Level::Statement);
    let helpers: Vec<&str> = unit.helpers().iter().map(String::as_str).collect();
    assert_eq!(helpers, ["klass", "range"]);
}

#[test]
fn test_class_name_must_be_constant() {
    let node = s(Tag::Class, [Child::Node(lvar("x")), Child::Empty, Child::Empty]);
    let err = compile_err(&node, Level::Statement);
    assert!(matches!(err, CompileError::MalformedNode { kind: Tag::Class, .. }), "{err:?}");
}
