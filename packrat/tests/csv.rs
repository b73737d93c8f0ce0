//! A very simple csv grammar that acts only on numbers. Whitespace is not
//! skipped between tokens, since newlines are significant.

use grammar::{compile_with, Grammar};
use packrat::{parse, Parsed, Tree};

const CSV: &str = r"
csv => record csv | record
record => fields \n
fields => field , fields | field
field => [0-9]+
";

fn grammar() -> Grammar {
    compile_with(CSV, "").unwrap()
}

/// Collects every subtree for `symbol`, outermost first.
fn collect<'t, 'a>(tree: &'t Tree<'a>, symbol: &str, out: &mut Vec<&'t Tree<'a>>) {
    if tree.symbol() == Some(symbol) {
        out.push(tree);
    }
    for child in tree.children() {
        collect(child, symbol, out);
    }
}

fn parse_complete<'a>(g: &'a Grammar, start: &str, input: &'a str) -> Parsed<'a> {
    let parsed = parse(start, input, g).unwrap().unwrap();
    assert!(parsed.is_complete(), "left over: {:?}", parsed.remainder);
    parsed
}

#[test]
fn field() {
    let g = grammar();
    let parsed = parse_complete(&g, "field", "789");
    assert_eq!(parsed.tree, Tree::node("field", vec![Tree::token("789")]));
}

#[test]
fn fields() {
    let g = grammar();
    let parsed = parse_complete(&g, "fields", "123,789");

    let mut field_trees = Vec::new();
    collect(&parsed.tree, "field", &mut field_trees);
    let texts: Vec<String> = field_trees.iter().map(|t| t.text()).collect();
    assert_eq!(texts, vec!["123", "789"]);
}

#[test]
fn record() {
    let g = grammar();
    let parsed = parse_complete(&g, "record", "123,789\n");
    assert_eq!(parsed.tree.children().len(), 2);
    assert_eq!(*parsed.tree.children()[1], Tree::token("\n"));
}

#[test]
fn csv() {
    let g = grammar();
    let parsed = parse_complete(&g, "csv", "184,754\n33,22222\n");

    let mut records = Vec::new();
    collect(&parsed.tree, "record", &mut records);
    assert_eq!(records.len(), 2, "tree: {}", parsed.tree);
}

#[test]
fn spaces_are_not_skipped() {
    let g = grammar();
    let parsed = parse("csv", "1, 2\n", &g).unwrap();
    assert_eq!(parsed, None);
}

#[test]
fn missing_final_newline_leaves_remainder() {
    let g = grammar();
    let parsed = parse("csv", "1,2\n3", &g).unwrap().unwrap();
    assert_eq!(parsed.remainder, "3");
}
