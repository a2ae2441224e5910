//! Tokenizer for template strings.

use std::fmt;

use phf::{Map, phf_map};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Slash,
    Star,
    DoubleStar,
    /// Maximal run of characters other than `/ * { } =`.
    Literal(&'a str),
    LeftBrace,
    RightBrace,
    Equals,
    EndOfInput,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slash => f.write_str("'/'"),
            Self::Star => f.write_str("'*'"),
            Self::DoubleStar => f.write_str("'**'"),
            Self::Literal(text) => write!(f, "literal {text:?}"),
            Self::LeftBrace => f.write_str("'{'"),
            Self::RightBrace => f.write_str("'}'"),
            Self::Equals => f.write_str("'='"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Single-character tokens. `*` is absent because it may start `**`.
const PUNCTUATION: Map<char, Token<'static>> = phf_map! {
    '/' => Token::Slash,
    '{' => Token::LeftBrace,
    '}' => Token::RightBrace,
    '=' => Token::Equals,
};

fn is_reserved(c: char) -> bool {
    c == '*' || PUNCTUATION.contains_key(&c)
}

/// Produces tokens one at a time with a single token of lookahead.
///
/// The lexer never backtracks: once a token is consumed with [`Lexer::bump`] it becomes
/// [`Lexer::prev`] and is never produced again.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    curr: Token<'a>,
    prev: Option<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            pos: 0,
            curr: Token::EndOfInput,
            prev: None,
        };
        lexer.curr = lexer.scan();
        lexer
    }

    /// The current (not yet consumed) token.
    pub fn peek(&self) -> Token<'a> {
        self.curr
    }

    /// The most recently consumed token.
    pub fn prev(&self) -> Option<Token<'a>> {
        self.prev
    }

    /// Consume and return the current token.
    pub fn bump(&mut self) -> Token<'a> {
        let token = self.curr;
        self.prev = Some(token);
        self.curr = self.scan();
        token
    }

    /// Consume the current token if it equals `expected`.
    pub fn eat(&mut self, expected: Token<'_>) -> bool {
        if self.curr == expected {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is a literal, returning its text.
    pub fn eat_literal(&mut self) -> Option<&'a str> {
        match self.curr {
            Token::Literal(text) => {
                self.bump();
                Some(text)
            }
            _ => None,
        }
    }

    fn scan(&mut self) -> Token<'a> {
        let rest = &self.input[self.pos..];
        let Some(c) = rest.chars().next() else {
            return Token::EndOfInput;
        };
        if c == '*' {
            if rest[1..].starts_with('*') {
                self.pos += 2;
                return Token::DoubleStar;
            }
            self.pos += 1;
            return Token::Star;
        }
        if let Some(&token) = PUNCTUATION.get(&c) {
            self.pos += c.len_utf8();
            return token;
        }
        let len = rest.find(is_reserved).unwrap_or(rest.len());
        self.pos += len;
        Token::Literal(&rest[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let token = lexer.bump();
            out.push(token);
            if token == Token::EndOfInput {
                break;
            }
        }
        out
    }

    #[test]
    fn test_alternating_slash_literal() {
        let mut lexer = Lexer::new("/a/b/c/d/e/f/g/h/i/j/k/l/m/n/o/p/q/r/s/t/u/v/w/x/y/z");
        for c in 'a'..='z' {
            assert!(lexer.eat(Token::Slash), "expected slash before {c}");
            assert_eq!(lexer.eat_literal(), Some(c.to_string().as_str()));
        }
        assert_eq!(lexer.peek(), Token::EndOfInput);
    }

    #[test]
    fn test_star_and_double_star() {
        assert_eq!(
            tokens("/*/**/***"),
            vec![
                Token::Slash,
                Token::Star,
                Token::Slash,
                Token::DoubleStar,
                Token::Slash,
                Token::DoubleStar,
                Token::Star,
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_variable_tokens() {
        assert_eq!(
            tokens("{name=sub/**}"),
            vec![
                Token::LeftBrace,
                Token::Literal("name"),
                Token::Equals,
                Token::Literal("sub"),
                Token::Slash,
                Token::DoubleStar,
                Token::RightBrace,
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_literal_stops_at_reserved() {
        assert_eq!(
            tokens("ab*cd"),
            vec![
                Token::Literal("ab"),
                Token::Star,
                Token::Literal("cd"),
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_non_ascii_literal() {
        assert_eq!(
            tokens("/café/ü"),
            vec![
                Token::Slash,
                Token::Literal("café"),
                Token::Slash,
                Token::Literal("ü"),
                Token::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.peek(), Token::EndOfInput);
        assert_eq!(lexer.bump(), Token::EndOfInput);
        assert_eq!(lexer.peek(), Token::EndOfInput);
    }

    #[test]
    fn test_prev_tracks_consumed_token() {
        let mut lexer = Lexer::new("/users");
        assert_eq!(lexer.prev(), None);
        lexer.bump();
        assert_eq!(lexer.prev(), Some(Token::Slash));
        assert_eq!(lexer.eat_literal(), Some("users"));
        assert_eq!(lexer.prev(), Some(Token::Literal("users")));
        assert!(!lexer.eat(Token::Slash));
        assert_eq!(lexer.prev(), Some(Token::Literal("users")));
    }
}
