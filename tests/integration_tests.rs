//! End-to-end: parser JSON in, JavaScript and source map out.

use garnet::ast::build::{begin, dstr, evstr, int, lasgn, leaf, lvar, n, s, send, str_lit, sym};
use garnet::ast::{Child, NodeFlags, Tag};
use garnet::common::diagnostics::diagnostic_codes;
use garnet::{CompilerOptions, LogFormat, ScopeKind, compile_unit, init_tracing, parse_ast};

#[test]
fn test_compile_unit_statement_sequence() {
    init_tracing();
    let root = begin([
        lasgn("name", str_lit("world")),
        send(None, "puts", [dstr([str_lit("hello "), evstr(lvar("name"))])]),
        n(Tag::Alias, [sym("greet"), sym("puts")]),
    ]);
    let unit = compile_unit(&root, CompilerOptions::default()).expect("compiles");
    assert_eq!(
        unit.code(),
        "name = \"world\";\n\
         self.$puts(\"\" + \"hello \" + (name));\n\
         Opal.alias(self, \"greet\", \"puts\");"
    );
    assert!(unit.locals().contains("name"));
    assert_eq!(unit.declared_method_names(), ["greet"]);
}

#[test]
fn test_compile_unit_reports_diagnostic() {
    let root = begin([int(1), leaf(Tag::Rescue).at(4, 2)]);
    let options = CompilerOptions::default().with_file("app.rb");
    let diagnostic = compile_unit(&root, options).expect_err("rescue has no handler");

    assert_eq!(diagnostic.code, diagnostic_codes::UNKNOWN_NODE_KIND);
    assert_eq!(diagnostic.file, "app.rb");
    assert_eq!(
        diagnostic.to_string(),
        "app.rb:4:2 - error G9001: no handler registered for 'rescue' nodes at 4:2"
    );
}

#[test]
fn test_parse_ast_from_parser_json() {
    let json = r#"{
        "kind": "begin",
        "children": [
            {"node": {"kind": "lasgn", "children": [
                {"literal": {"name": "r"}},
                {"node": {"kind": "erange", "children": [
                    {"node": {"kind": "int", "children": [{"literal": {"int": 0}}]}},
                    {"node": {"kind": "int", "children": [{"literal": {"int": 3}}],
                              "position": {"line": 2, "column": 8}}}
                ]}}
            ], "position": {"line": 2, "column": 0}}},
            {"node": {"kind": "lvar", "children": [{"literal": {"name": "r"}}]}}
        ],
        "position": {"line": 1, "column": 0}
    }"#;
    let root = parse_ast(json).expect("valid tree");
    assert_eq!(root.kind, Tag::Begin);

    let unit = compile_unit(&root, CompilerOptions::default()).expect("compiles");
    assert_eq!(unit.code(), "r = $range(0, 3, true);\nr;");
    assert!(unit.helpers().contains("range"));
    assert!(unit.mappings().iter().any(|m| m.original.line == 2 && m.original.column == 8));
}

#[test]
fn test_parse_ast_rejects_unknown_kind() {
    assert!(parse_ast(r#"{"kind": "while", "children": []}"#).is_err());
}

#[test]
fn test_parse_ast_rejects_flags_on_non_sequence() {
    let json = r#"{
        "kind": "begin",
        "children": [
            {"node": {"kind": "int", "children": [{"literal": {"int": 7}}],
                      "flags": "FORCE_WRAP"}}
        ]
    }"#;
    let err = parse_ast(json).expect_err("flags on int");
    assert!(err.to_string().contains("not valid on 'int' nodes"), "{err}");

    let flagged = r#"{"kind": "begin", "children": [
        {"node": {"kind": "int", "children": [{"literal": {"int": 7}}]}}
    ], "flags": "FORCE_WRAP"}"#;
    let root = parse_ast(flagged).expect("sequence accepts flags");
    assert!(root.has_flag(NodeFlags::FORCE_WRAP));
}

#[test]
fn test_class_unit_scope() {
    let root = s(Tag::Alias, [Child::Node(sym("a")), Child::Node(sym("b"))]);
    let options = CompilerOptions::default().with_unit_scope(ScopeKind::Class);
    let unit = compile_unit(&root, options).expect("compiles");
    assert_eq!(unit.declared_method_names(), ["a"]);
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
    assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
    assert_eq!(LogFormat::parse(""), LogFormat::Text);
    assert_eq!(LogFormat::parse("fancy"), LogFormat::Text);
}
