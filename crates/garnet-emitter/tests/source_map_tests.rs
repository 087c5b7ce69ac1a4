//! Fragment origins, derived mappings and the Source Map v3 document.

mod common;

use common::compile;
use garnet_ast::build::{begin, dstr, evstr, int, lasgn, lvar, n, send, str_lit};
use garnet_ast::{AstNode, Tag};
use garnet_common::SourcePosition;
use garnet_common::source_map::vlq;
use garnet_emitter::{Compiler, CompilerOptions, Level};
use serde_json::Value;

fn two_statements() -> AstNode {
    begin([
        lasgn("a", int(1).at(1, 4)).at(1, 0),
        send(None, "puts", [lvar("a").at(2, 5)]).at(2, 0),
    ])
    .at(1, 0)
}

/// Decode a `mappings` string into absolute `[column, source, line, column]`
/// segments, one vector per generated line.
fn decode_mappings(mappings: &str) -> Vec<Vec<[i64; 4]>> {
    let mut lines = Vec::new();
    let mut state = [0i64; 4];
    for line in mappings.split(';') {
        state[0] = 0;
        let mut segments = Vec::new();
        for segment in line.split(',').filter(|s| !s.is_empty()) {
            let mut rest = segment;
            for field in &mut state {
                let (delta, consumed) = vlq::decode(rest).expect("valid VLQ field");
                *field += delta;
                rest = &rest[consumed..];
            }
            assert!(rest.is_empty(), "segment {segment} has extra fields");
            segments.push(state);
        }
        lines.push(segments);
    }
    lines
}

#[test]
fn test_every_origin_fragment_gets_a_mapping() {
    let unit = compile(&two_statements(), Level::Statement);
    assert_eq!(unit.code(), "a = 1;\nself.$puts(a);");

    let with_origin = unit
        .fragments()
        .iter()
        .filter(|f| f.origin.is_some() && !f.text.is_empty())
        .count();
    assert_eq!(unit.mappings().len(), with_origin);
    assert_eq!(with_origin, 10);
}

#[test]
fn test_mapping_offsets_and_positions() {
    let unit = compile(&two_statements(), Level::Statement);
    let code = unit.code();

    let arg = unit
        .mappings()
        .into_iter()
        .find(|m| m.original == SourcePosition::new(2, 5))
        .expect("mapping for the call argument");
    assert_eq!(arg.generated_line, 1);
    assert_eq!(arg.generated_column, 11);
    assert_eq!(&code[arg.output_offset..arg.output_offset + 1], "a");

    let value = unit
        .mappings()
        .into_iter()
        .find(|m| m.original == SourcePosition::new(1, 4))
        .expect("mapping for the assigned value");
    assert_eq!((value.generated_line, value.generated_column), (0, 4));
    assert_eq!(value.output_offset, 4);
}

#[test]
fn test_mappings_are_ordered_by_output_offset() {
    let unit = compile(&two_statements(), Level::Statement);
    let offsets: Vec<usize> = unit.mappings().iter().map(|m| m.output_offset).collect();
    let mut sorted = offsets.clone();
    sorted.sort_unstable();
    assert_eq!(offsets, sorted);
}

#[test]
fn test_generated_columns_count_utf16_units() {
    let node = dstr([str_lit("😀"), evstr(lvar("x").at(1, 9))]).at(1, 0);
    let unit = compile(&node, Level::Expression);
    assert_eq!(unit.code(), r#""" + "😀" + (x)"#);

    let x = unit
        .mappings()
        .into_iter()
        .find(|m| m.original == SourcePosition::new(1, 9))
        .expect("mapping for the interpolated value");
    assert_eq!(x.generated_column, 13);
    assert_eq!(x.output_offset, 15);
}

#[test]
fn test_unpositioned_nodes_produce_no_mappings() {
    let unit = compile(&n(Tag::Irange, [int(1), int(2)]), Level::Expression);
    assert!(unit.mappings().is_empty());
}

#[test]
fn test_source_map_document() {
    let options = CompilerOptions {
        file: "out.js".to_string(),
        source: Some("in.rb".to_string()),
        ..CompilerOptions::default()
    };
    let unit = Compiler::new(options)
        .compile(&two_statements(), Level::Statement)
        .expect("compiles");

    let json: Value = serde_json::from_str(&unit.source_map_json().expect("serializes"))
        .expect("valid JSON");
    assert_eq!(json["version"], 3);
    assert_eq!(json["file"], "out.js");
    assert_eq!(json["sources"], serde_json::json!(["in.rb"]));

    let lines = decode_mappings(json["mappings"].as_str().expect("mappings string"));
    assert_eq!(lines.len(), 2);
    // `a` of `a = 1` maps to line 1, column 0 (0-based line 0)
    assert_eq!(lines[0][0], [0, 0, 0, 0]);
    // `1` at generated column 4 maps to 1:4
    assert_eq!(lines[0][2], [4, 0, 0, 4]);
    // Call argument on the second generated line maps to 2:5
    assert!(lines[1].contains(&[11, 0, 1, 5]), "{:?}", lines[1]);
}
