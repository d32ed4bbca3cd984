// muzzle-core/src/patterns/parser.rs
//! Single-pass parser for the blacklist pattern DSL.
//!
//! Grammar:
//!
//! ```text
//! Pattern   ::= BoundaryAssertion? Node* BoundaryAssertion?
//! Node      ::= Literal | Optional | Wildcard
//! Optional  ::= '[' (Wildcard | Literal-without-brackets) ']'
//! Wildcard  ::= '?'
//! Literal   ::= (AnyChar-except-specials | '\' EscapableChar)+
//! EscapableChar ::= one of { '\', '[', ']', '?', '|' }
//! BoundaryAssertion ::= '|'
//! ```
//!
//! The parser walks codepoints (not UTF-16 units or bytes) exactly once,
//! tracking 1-based line/column positions, and uses a one-step pushback
//! after each lookahead.
//!
//! License: MIT OR APACHE 2.0

use crate::errors::ParseError;
use crate::patterns::ast::{Node, Pattern};

const ESCAPABLE: [char; 5] = ['\\', '[', ']', '?', '|'];

/// An explicit scanning cursor over the pattern's codepoints.
///
/// `backup` restores the state from before the most recent `next` and may
/// only be invoked once before the next advance.
#[derive(Debug)]
struct Cursor {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    prev: Option<(usize, u32, u32)>,
}

impl Cursor {
    fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0, line: 1, column: 0, prev: None }
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.prev = Some((self.pos, self.line, self.column));
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn backup(&mut self) {
        let (pos, line, column) = self.prev.take().expect("backup invoked twice before an advance");
        self.pos = pos;
        self.line = line;
        self.column = column;
    }

    /// The 1-based position of the most recently consumed codepoint.
    fn last_position(&self) -> (u32, u32) {
        match self.prev {
            Some((_, line, column)) => (line, column + 1),
            None => (self.line, self.column + 1),
        }
    }
}

/// Parses one pattern, failing with a position-carrying error on malformed
/// input. No partial pattern is ever returned.
pub fn parse(input: &str) -> Result<Pattern, ParseError> {
    Parser { cursor: Cursor::new(input) }.parse()
}

struct Parser {
    cursor: Cursor,
}

impl Parser {
    fn parse(mut self) -> Result<Pattern, ParseError> {
        let mut pattern = Pattern::default();
        if let Some(c) = self.cursor.next() {
            if c == '|' {
                pattern.require_word_boundary_at_start = true;
            } else {
                self.cursor.backup();
            }
        }
        while let Some(c) = self.cursor.next() {
            match c {
                '[' => pattern.nodes.push(self.parse_optional()?),
                ']' => {
                    return Err(self.error_at_last("Unmatched ']' without a preceding '['"));
                }
                '?' => pattern.nodes.push(Node::Wildcard),
                '|' => {
                    let position = self.cursor.last_position();
                    if self.cursor.next().is_some() {
                        return Err(error_at(
                            position,
                            "A word boundary assertion is only allowed at the very start or end of the pattern",
                        ));
                    }
                    pattern.require_word_boundary_at_end = true;
                }
                _ => {
                    self.cursor.backup();
                    pattern.nodes.push(self.parse_literal()?);
                }
            }
        }
        Ok(pattern)
    }

    /// Consumes a maximal run of literal codepoints. The cursor is known to
    /// sit before at least one literal (or escape) codepoint.
    fn parse_literal(&mut self) -> Result<Node, ParseError> {
        let mut chars = Vec::new();
        while let Some(c) = self.cursor.next() {
            match c {
                '\\' => chars.push(self.parse_escape()?),
                '[' | ']' | '?' | '|' => {
                    self.cursor.backup();
                    break;
                }
                _ => chars.push(c),
            }
        }
        Ok(Node::Literal(chars))
    }

    /// Consumes the escaped codepoint following an already-consumed '\'.
    fn parse_escape(&mut self) -> Result<char, ParseError> {
        let backslash = self.cursor.last_position();
        match self.cursor.next() {
            None => Err(error_at(backslash, "Trailing '\\' with nothing to escape")),
            Some(c) if ESCAPABLE.contains(&c) => Ok(c),
            Some(c) => Err(self.error_at_last_fmt(format!("'\\{}' is not a recognized escape", c))),
        }
    }

    /// Consumes an optional expression; the opening '[' has already been
    /// consumed.
    fn parse_optional(&mut self) -> Result<Node, ParseError> {
        let bracket = self.cursor.last_position();
        let child = match self.cursor.next() {
            None => return Err(error_at(bracket, "Unclosed '[' in optional expression")),
            Some('?') => Node::Wildcard,
            Some(']') => {
                return Err(error_at(bracket, "Optional expression must contain a wildcard or literal"));
            }
            Some('[') => {
                return Err(self.error_at_last("Nested optional expressions are not supported"));
            }
            Some('|') => {
                let position = self.cursor.last_position();
                if self.cursor.next() == Some(']') {
                    return Err(error_at(
                        position,
                        "A word boundary assertion cannot be the only content of an optional expression",
                    ));
                }
                return Err(error_at(
                    position,
                    "A word boundary assertion is only allowed at the very start or end of the pattern",
                ));
            }
            Some(_) => {
                self.cursor.backup();
                self.parse_literal()?
            }
        };
        match self.cursor.next() {
            Some(']') => Ok(Node::Optional(Box::new(child))),
            Some('[') => Err(self.error_at_last("Nested optional expressions are not supported")),
            Some('|') => Err(self.error_at_last(
                "A word boundary assertion is only allowed at the very start or end of the pattern",
            )),
            Some(_) => Err(self.error_at_last("Expected ']' to close the optional expression")),
            None => Err(error_at(bracket, "Unclosed '[' in optional expression")),
        }
    }

    fn error_at_last(&self, message: &str) -> ParseError {
        error_at(self.cursor.last_position(), message)
    }

    fn error_at_last_fmt(&self, message: String) -> ParseError {
        let (line, column) = self.cursor.last_position();
        ParseError { message, line, column }
    }
}

fn error_at((line, column): (u32, u32), message: &str) -> ParseError {
    ParseError { message: message.to_string(), line, column }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(s: &str) -> Node {
        Node::Literal(s.chars().collect())
    }

    #[test]
    fn test_parse_plain_literal() {
        let pattern = parse("fuck").unwrap();
        assert_eq!(pattern.nodes, vec![literal("fuck")]);
        assert!(!pattern.require_word_boundary_at_start);
        assert!(!pattern.require_word_boundary_at_end);
    }

    #[test]
    fn test_parse_empty_pattern() {
        let pattern = parse("").unwrap();
        assert!(pattern.nodes.is_empty());
    }

    #[test]
    fn test_parse_optional_wildcard() {
        let pattern = parse("f[?]ck").unwrap();
        assert_eq!(
            pattern.nodes,
            vec![literal("f"), Node::Optional(Box::new(Node::Wildcard)), literal("ck")]
        );
    }

    #[test]
    fn test_parse_optional_literal() {
        let pattern = parse("bitch[e][s]").unwrap();
        assert_eq!(
            pattern.nodes,
            vec![
                literal("bitch"),
                Node::Optional(Box::new(literal("e"))),
                Node::Optional(Box::new(literal("s"))),
            ]
        );
    }

    #[test]
    fn test_parse_boundaries_at_both_edges() {
        let pattern = parse("|ass|").unwrap();
        assert!(pattern.require_word_boundary_at_start);
        assert!(pattern.require_word_boundary_at_end);
        assert_eq!(pattern.nodes, vec![literal("ass")]);
    }

    #[test]
    fn test_parse_escapes() {
        let pattern = parse(r"a\?b\[c\]d\\e\|f").unwrap();
        assert_eq!(pattern.nodes, vec![literal(r"a?b[c]d\e|f")]);
    }

    #[test]
    fn test_wildcard_outside_optional() {
        let pattern = parse("a?b").unwrap();
        assert_eq!(pattern.nodes, vec![literal("a"), Node::Wildcard, literal("b")]);
    }

    #[test]
    fn test_error_unmatched_closing_bracket() {
        let err = parse("abc]").unwrap_err();
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn test_error_unclosed_optional_points_at_bracket() {
        let err = parse("a[bc").unwrap_err();
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn test_error_nested_optional() {
        let err = parse("[a[b]]").unwrap_err();
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_error_empty_optional() {
        let err = parse("a[]").unwrap_err();
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn test_error_mid_pattern_boundary_points_at_first_non_edge() {
        let err = parse("|a|b|").unwrap_err();
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_error_boundary_as_only_optional_content() {
        let err = parse("[|]").unwrap_err();
        assert_eq!((err.line, err.column), (1, 2));
        assert!(err.message.contains("only content"));
    }

    #[test]
    fn test_error_trailing_backslash() {
        let err = parse(r"ab\").unwrap_err();
        assert_eq!((err.line, err.column), (1, 3));
    }

    #[test]
    fn test_error_unknown_escape() {
        let err = parse(r"\x").unwrap_err();
        assert_eq!((err.line, err.column), (1, 2));
    }

    #[test]
    fn test_error_position_tracks_lines() {
        let err = parse("a\nb]").unwrap_err();
        assert_eq!((err.line, err.column), (2, 2));
    }

    #[test]
    fn test_double_pipe_is_both_boundaries() {
        let pattern = parse("||").unwrap();
        assert!(pattern.require_word_boundary_at_start);
        assert!(pattern.require_word_boundary_at_end);
        assert!(pattern.nodes.is_empty());
    }
}
