use regex::Regex;

/// The pattern skipped in front of every terminal.
#[derive(Debug, Clone)]
pub struct Whitespace {
    pattern: String,
    /// Number of groups the pattern brings along, counting the implicit
    /// whole-match group. A terminal's own group comes right after these.
    groups: usize,
}

impl Whitespace {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let groups = Regex::new(pattern)?.captures_len();
        Ok(Whitespace {
            pattern: pattern.to_owned(),
            groups,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// A token matched at the front of some text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t> {
    /// The text captured by the terminal, without leading whitespace.
    pub text: &'t str,
    /// Byte length of the whole match, leading whitespace included.
    pub end: usize,
}

/// Matches one terminal, anchored at the start of the text it is given.
#[derive(Debug)]
pub struct Tokenizer {
    regex: Regex,
    group: usize,
}

impl Tokenizer {
    pub fn new(whitespace: &Whitespace, fragment: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{})({})", whitespace.pattern, fragment))?;
        Ok(Tokenizer {
            regex,
            group: whitespace.groups,
        })
    }

    /// Skips whitespace then matches the terminal. Returns `None` if the
    /// terminal does not match right there.
    pub fn tokenize<'t>(&self, text: &'t str) -> Option<Token<'t>> {
        let caps = self.regex.captures(text)?;
        let end = caps.get(0)?.end();
        let text = caps.get(self.group)?.as_str();
        Some(Token { text, end })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer(whitespace: &str, fragment: &str) -> Tokenizer {
        Tokenizer::new(&Whitespace::new(whitespace).unwrap(), fragment).unwrap()
    }

    #[test]
    fn skips_leading_whitespace() {
        let tests = vec![
            ("a", Some(Token { text: "a", end: 1 })),
            ("  a", Some(Token { text: "a", end: 3 })),
            ("\n\ta b", Some(Token { text: "a", end: 3 })),
            ("b", None),
            ("", None),
        ];
        let t = tokenizer(r"\s*", "a");
        for test in tests {
            assert_eq!(t.tokenize(test.0), test.1, "input: {:?}", test.0);
        }
    }

    #[test]
    fn anchored_at_start() {
        let t = tokenizer(r"\s*", "[0-9]+");
        assert_eq!(t.tokenize("x12"), None);
        assert_eq!(t.tokenize("12x"), Some(Token { text: "12", end: 2 }));
    }

    #[test]
    fn trailing_whitespace_left_alone() {
        let t = tokenizer(r"\s*", "a");
        assert_eq!(t.tokenize(" a  "), Some(Token { text: "a", end: 2 }));
    }

    #[test]
    fn empty_whitespace_pattern() {
        let t = tokenizer("", "a");
        assert_eq!(t.tokenize(" a"), None);
        assert_eq!(t.tokenize("a"), Some(Token { text: "a", end: 1 }));
    }

    #[test]
    fn zero_width_terminal() {
        let t = tokenizer(r"\s*", "x?");
        assert_eq!(t.tokenize("   y"), Some(Token { text: "", end: 3 }));
    }

    #[test]
    fn whitespace_groups_do_not_shift_token() {
        // Comments count as whitespace here.
        let t = tokenizer(r"(\s|(#[^\n]*\n))*", "[a-z]+");
        assert_eq!(
            t.tokenize(" # note\n  word"),
            Some(Token {
                text: "word",
                end: 14
            })
        );
    }

    #[test]
    fn terminal_alternation_stays_grouped() {
        let t = tokenizer(r"\s*", "ab|cd");
        assert_eq!(t.tokenize(" cd"), Some(Token { text: "cd", end: 3 }));
    }

    #[test]
    fn invalid_fragment() {
        let ws = Whitespace::new(r"\s*").unwrap();
        assert!(Tokenizer::new(&ws, "(unclosed").is_err());
    }
}
