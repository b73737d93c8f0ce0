//! JSON, as one client of the engine.
//!
//! Trees keep every token, punctuation included; numbers split into `int`,
//! `frac` and `exp`. Empty arrays are not part of the grammar.

use crate::{MatchError, Parsed, Parser, ParserRule};

#[derive(Parser)]
#[grammar_file = "grammars/json.peg"]
pub struct Json;

/// Parses a JSON value from the start of `text`.
pub fn parse(text: &str) -> Result<Option<Parsed<'_>>, MatchError> {
    packrat::parse(Rule::value.name(), text, Json::grammar())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;

    #[test]
    fn rules_follow_the_description() {
        let names: Vec<&str> = Json::grammar().rules().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "value", "string", "array", "elements", "object", "members", "pair", "number",
                "int", "frac", "exp"
            ]
        );
        assert_eq!(Rule::frac.name(), "frac");
    }

    #[test]
    fn literal_values() {
        for literal in ["null", "true", "false"] {
            let parsed = parse(literal).unwrap().unwrap();
            assert_eq!(parsed.tree, Tree::node("value", vec![Tree::token(literal)]));
            assert!(parsed.is_complete());
        }
    }

    #[test]
    fn start_from_inner_rule() {
        let parsed = Json::parse(Rule::number, "12e3").unwrap().unwrap();
        assert_eq!(
            parsed.tree.to_string(),
            r#"["number", ["int", "12"], ["exp", "e3"]]"#
        );
    }
}
