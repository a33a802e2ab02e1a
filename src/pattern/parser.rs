//! Recursive descent parser for pattern text.
//!
//! ```text
//! pattern       := literal | constructor | qualified | identifier | wildcard
//! constructor   := qualified-name '(' (pattern (',' pattern)*)? ')'
//! qualified     := identifier ('.' identifier)+          // constructor without fields
//! identifier    := [A-Za-z0-9_]+                         // not all digits, not `_`
//! wildcard      := '_'
//! literal       := number | string | 'true' | 'false' | 'null' | json-array | json-object
//! ```
//!
//! Array and object literals are sliced out by bracket balancing and handed
//! to `serde_json`, so they follow JSON syntax. Constructors may nest at most
//! [`MAX_DEPTH`] levels deep.

use super::ast::Pattern;
use crate::error::{Error, Result};
use crate::value::Value;

/// Deepest constructor nesting accepted by [`parse`].
pub const MAX_DEPTH: usize = 256;

/// Parses pattern text into a [`Pattern`].
///
/// # Errors
///
/// Returns [`Error::PatternSyntax`] describing the first problem found.
///
/// # Examples
///
/// ```rust
/// use bilby::pattern::{self, Pattern};
/// use bilby::Value;
///
/// assert_eq!(pattern::parse("_").unwrap(), Pattern::Wildcard);
/// assert_eq!(pattern::parse("42").unwrap(), Pattern::Literal(Value::from(42)));
/// assert!(pattern::parse("Cons(a,").is_err());
/// ```
pub fn parse(text: &str) -> Result<Pattern> {
    let mut parser = Parser {
        text,
        position: 0,
        depth: 0,
    };
    let pattern = parser.pattern()?;
    parser.skip_whitespace();
    if parser.position < text.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(pattern)
}

struct Parser<'a> {
    text: &'a str,
    position: usize,
    depth: usize,
}

const fn is_word(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

impl Parser<'_> {
    fn error(&self, message: impl Into<String>) -> Error {
        Error::PatternSyntax {
            pattern: self.text.to_string(),
            position: self.position,
            message: message.into(),
        }
    }

    fn rest(&self) -> &str {
        &self.text[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.position += character.len_utf8();
        Some(character)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> &str {
        let start = self.position;
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
        &self.text[start..self.position]
    }

    fn pattern(&mut self) -> Result<Pattern> {
        self.skip_whitespace();
        if self.depth == MAX_DEPTH {
            return Err(self.error("pattern nested too deeply"));
        }
        self.depth += 1;
        let pattern = self.term();
        self.depth -= 1;
        pattern
    }

    fn term(&mut self) -> Result<Pattern> {
        match self.peek() {
            None => Err(self.error("unexpected end of pattern")),
            Some(quote @ ('"' | '\'')) => self.string(quote),
            Some('[' | '{') => self.structured_literal(),
            Some(character) if character == '-' || character.is_ascii_digit() => {
                self.number_or_word()
            }
            Some(character) if is_word(character) => self.word_pattern(),
            Some(character) => Err(self.error(format!("unexpected character `{character}`"))),
        }
    }

    fn number_or_word(&mut self) -> Result<Pattern> {
        let start = self.position;
        let negative = self.eat('-');
        self.take_while(|character| character.is_ascii_digit());
        if self.rest().starts_with('.')
            && self.rest()[1..].starts_with(|character: char| character.is_ascii_digit())
        {
            self.bump();
            self.take_while(|character| character.is_ascii_digit());
        }
        let mantissa_end = self.position;
        if self.eat('e') || self.eat('E') {
            if !self.eat('-') {
                self.eat('+');
            }
            if self
                .take_while(|character| character.is_ascii_digit())
                .is_empty()
            {
                // No exponent digits: the letter starts an identifier.
                self.position = mantissa_end;
            }
        }
        if !negative && self.peek().is_some_and(is_word) {
            // Digits followed by letters form an identifier.
            self.position = start;
            return self.word_pattern();
        }
        let literal = self.text[start..self.position].to_string();
        match literal.parse::<f64>() {
            Ok(number) => Ok(Pattern::Literal(Value::from(number))),
            Err(_) => {
                self.position = start;
                Err(self.error(format!("invalid number `{literal}`")))
            }
        }
    }

    fn word_pattern(&mut self) -> Result<Pattern> {
        let first = self.take_while(is_word).to_string();
        match first.as_str() {
            "_" => return Ok(Pattern::Wildcard),
            "true" => return Ok(Pattern::Literal(Value::from(true))),
            "false" => return Ok(Pattern::Literal(Value::from(false))),
            "null" => return Ok(Pattern::Literal(Value::Null)),
            _ => {}
        }

        let mut path = vec![first];
        while self.eat('.') {
            let segment = self.take_while(is_word).to_string();
            if segment.is_empty() {
                return Err(self.error("expected a name after `.`"));
            }
            path.push(segment);
        }

        self.skip_whitespace();
        if self.eat('(') {
            let arguments = self.arguments()?;
            return Ok(Pattern::Constructor { path, arguments });
        }
        if path.len() > 1 {
            return Ok(Pattern::Constructor {
                path,
                arguments: Vec::new(),
            });
        }
        Ok(Pattern::Identifier(path.remove(0)))
    }

    fn arguments(&mut self) -> Result<Vec<Pattern>> {
        let mut arguments = Vec::new();
        self.skip_whitespace();
        if self.eat(')') {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.pattern()?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(')') => return Ok(arguments),
                Some(character) => {
                    self.position -= character.len_utf8();
                    return Err(self.error(format!("expected `,` or `)`, found `{character}`")));
                }
                None => return Err(self.error("unexpected end of pattern")),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<Pattern> {
        let start = self.position;
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => {
                    self.position = start;
                    return Err(self.error("unterminated string literal"));
                }
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some(escaped) => text.push(escaped),
                    None => {
                        self.position = start;
                        return Err(self.error("unterminated string literal"));
                    }
                },
                Some(character) if character == quote => {
                    return Ok(Pattern::Literal(Value::from(text)));
                }
                Some(character) => text.push(character),
            }
        }
    }

    fn structured_literal(&mut self) -> Result<Pattern> {
        let start = self.position;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        while let Some(character) = self.bump() {
            if in_string {
                match character {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match character {
                '"' => in_string = true,
                '[' | '{' => depth += 1,
                ']' | '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            self.position = start;
            return Err(self.error("unbalanced literal"));
        }
        match serde_json::from_str::<serde_json::Value>(&self.text[start..self.position]) {
            Ok(json) => Ok(Pattern::Literal(Value::from(json))),
            Err(error) => {
                self.position = start;
                Err(self.error(format!("invalid literal: {error}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    fn identifier(name: &str) -> Pattern {
        Pattern::Identifier(name.to_string())
    }

    fn constructor(path: &[&str], arguments: Vec<Pattern>) -> Pattern {
        Pattern::Constructor {
            path: path.iter().map(ToString::to_string).collect(),
            arguments,
        }
    }

    #[rstest]
    fn test_nested_constructor() {
        assert_eq!(
            parse("Cons(a, Cons(b, _))").unwrap(),
            constructor(
                &["Cons"],
                vec![
                    identifier("a"),
                    constructor(&["Cons"], vec![identifier("b"), Pattern::Wildcard]),
                ],
            )
        );
    }

    #[rstest]
    fn test_qualified_name() {
        assert_eq!(
            parse("List.Cons(x, List.Nil)").unwrap(),
            constructor(
                &["List", "Cons"],
                vec![identifier("x"), constructor(&["List", "Nil"], Vec::new())],
            )
        );
    }

    #[rstest]
    fn test_empty_argument_list() {
        assert_eq!(parse("Nil()").unwrap(), constructor(&["Nil"], Vec::new()));
        assert_eq!(parse(" Nil ( ) ").unwrap(), constructor(&["Nil"], Vec::new()));
    }

    #[rstest]
    #[case("7", Value::from(7))]
    #[case("-2.5", Value::from(-2.5))]
    #[case("1e3", Value::from(1000))]
    #[case("'single'", Value::from("single"))]
    #[case("\"double\"", Value::from("double"))]
    #[case("'it\\'s'", Value::from("it's"))]
    #[case("true", Value::from(true))]
    #[case("null", Value::Null)]
    #[case("[1, 2]", Value::from(vec![Value::from(1), Value::from(2)]))]
    #[case("{\"a\": [1]}", Value::object([("a", Value::from(vec![Value::from(1)]))]))]
    fn test_literals(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(parse(text).unwrap(), Pattern::Literal(expected));
    }

    #[rstest]
    fn test_literal_inside_constructor() {
        assert_eq!(
            parse("Pair([1, \"]\"], x)").unwrap(),
            constructor(
                &["Pair"],
                vec![
                    Pattern::Literal(Value::from(vec![Value::from(1), Value::from("]")])),
                    identifier("x"),
                ],
            )
        );
    }

    #[rstest]
    #[case("2nd")]
    #[case("1e")]
    #[case("2E")]
    #[case("3e_x")]
    fn test_digit_led_identifier(#[case] text: &str) {
        assert_eq!(parse(text).unwrap(), identifier(text));
    }

    #[rstest]
    fn test_exponent_without_digits_inside_constructor() {
        assert_eq!(
            parse("Pair(1e, 1e2)").unwrap(),
            constructor(
                &["Pair"],
                vec![identifier("1e"), Pattern::Literal(Value::from(100))],
            )
        );
    }

    fn nested(depth: usize) -> String {
        format!("{}x{}", "A(".repeat(depth), ")".repeat(depth))
    }

    #[rstest]
    fn test_nesting_within_limit_parses() {
        let pattern = parse(&nested(200)).unwrap();
        assert_eq!(pattern.binding_count(), 1);
    }

    #[rstest]
    #[case(MAX_DEPTH)]
    #[case(100_000)]
    fn test_nesting_beyond_limit_is_rejected(#[case] depth: usize) {
        match parse(&nested(depth)).unwrap_err() {
            Error::PatternSyntax {
                position, message, ..
            } => {
                assert_eq!(position, 2 * MAX_DEPTH);
                assert_eq!(message, "pattern nested too deeply");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    #[case("", 0)]
    #[case("Cons(a,", 7)]
    #[case("Cons(a b)", 7)]
    #[case("a b", 2)]
    #[case("'open", 0)]
    #[case("[1, 2", 0)]
    #[case("List.", 5)]
    #[case("#", 0)]
    fn test_syntax_errors(#[case] text: &str, #[case] position: usize) {
        let error = parse(text).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PatternSyntax);
        match error {
            Error::PatternSyntax {
                position: actual, ..
            } => assert_eq!(actual, position),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[rstest]
    fn test_display_round_trips_structure() {
        let pattern = parse("List.Cons(a, 'x', _)").unwrap();
        assert_eq!(pattern.to_string(), "List.Cons(a, \"x\", _)");
    }
}
