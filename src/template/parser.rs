//! Recursive descent parser for template strings.
//!
//! ```text
//! template    = "/" { segment | "/" } EOF
//! segment     = "**" | "*" | LITERAL | variable
//! variable    = "{" LITERAL ( "}" | "=" sub_pattern "}" )
//! sub_pattern = { sub_segment | "/" }          (at least one sub_segment)
//! sub_segment = "**" | "*" | LITERAL
//! ```
//!
//! Once a `**` has been consumed no further segment may follow, anywhere in the template.

use std::str::FromStr;

use crate::error::TemplateError;

use super::ast::{Segment, Template};
use super::lexer::{Lexer, Token};

/// Compile a template string into a [`Template`].
pub fn compile(input: &str) -> Result<Template, TemplateError> {
    let result = Parser {
        lexer: Lexer::new(input),
        seen_double_star: false,
    }
    .parse_template();
    match &result {
        Ok(template) => tracing::debug!(
            input,
            template = %template,
            segments = template.len(),
            "compiled template"
        ),
        Err(err) => tracing::debug!(input, error = %err, "rejected template"),
    }
    result
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        compile(s)
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Set once a `**` has been consumed, at any nesting level.
    seen_double_star: bool,
}

impl Parser<'_> {
    fn parse_template(&mut self) -> Result<Template, TemplateError> {
        if !self.lexer.eat(Token::Slash) {
            return Err(TemplateError::MissingLeadingSlash {
                found: self.lexer.peek().to_string(),
            });
        }

        let mut segments = Vec::new();
        loop {
            match self.lexer.peek() {
                Token::EndOfInput => break,
                Token::Slash => {
                    self.lexer.bump();
                }
                _ => {
                    segments.push(self.parse_segment(None)?);
                    self.expect_delimiter(false)?;
                }
            }
        }
        Ok(Template { segments })
    }

    /// Parse one segment. `enclosing` names the variable whose sub-pattern is being parsed.
    fn parse_segment(&mut self, enclosing: Option<&str>) -> Result<Segment, TemplateError> {
        if self.seen_double_star {
            return Err(TemplateError::IllegalDoubleStarPlacement);
        }
        match self.lexer.bump() {
            Token::DoubleStar => {
                self.seen_double_star = true;
                Ok(Segment::DoubleStar)
            }
            Token::Star => Ok(Segment::Star),
            Token::Literal(text) => Ok(Segment::Literal(text.to_string())),
            Token::LeftBrace => match enclosing {
                Some(variable) => Err(TemplateError::NestedVariableNotAllowed {
                    variable: variable.to_string(),
                }),
                None => self.parse_variable(),
            },
            other => Err(TemplateError::UnexpectedToken {
                expected: "a segment",
                found: other.to_string(),
            }),
        }
    }

    /// Parse the remainder of a variable; the opening `{` has already been consumed.
    fn parse_variable(&mut self) -> Result<Segment, TemplateError> {
        let name = match self.lexer.bump() {
            Token::Literal(name) => name.to_string(),
            Token::EndOfInput => {
                return Err(TemplateError::UnexpectedEndOfInput {
                    expected: "variable name after '{'".to_string(),
                });
            }
            other => {
                return Err(TemplateError::UnexpectedToken {
                    expected: "variable name",
                    found: other.to_string(),
                });
            }
        };

        match self.lexer.bump() {
            Token::RightBrace => Ok(Segment::Variable {
                name,
                pattern: None,
            }),
            Token::Equals => {
                let pattern = self.parse_sub_pattern(&name)?;
                Ok(Segment::Variable {
                    name,
                    pattern: Some(pattern),
                })
            }
            Token::EndOfInput => Err(TemplateError::UnexpectedEndOfInput {
                expected: format!("'}}' to close variable '{name}'"),
            }),
            other => Err(TemplateError::UnexpectedToken {
                expected: "'=' or '}'",
                found: other.to_string(),
            }),
        }
    }

    /// Parse a sub-pattern up to and including the closing `}`.
    fn parse_sub_pattern(&mut self, name: &str) -> Result<Vec<Segment>, TemplateError> {
        let mut segments = Vec::new();
        loop {
            match self.lexer.peek() {
                Token::RightBrace => {
                    self.lexer.bump();
                    break;
                }
                Token::EndOfInput if segments.is_empty() => {
                    return Err(TemplateError::UnexpectedEndOfInput {
                        expected: format!("a pattern after '=' in variable '{name}'"),
                    });
                }
                Token::EndOfInput => {
                    return Err(TemplateError::UnexpectedEndOfInput {
                        expected: format!("'}}' to close variable '{name}'"),
                    });
                }
                Token::Slash => {
                    self.lexer.bump();
                }
                _ => {
                    segments.push(self.parse_segment(Some(name))?);
                    self.expect_delimiter(true)?;
                }
            }
        }
        if segments.is_empty() {
            return Err(TemplateError::UnexpectedEndOfInput {
                expected: format!("at least one segment after '=' in variable '{name}'"),
            });
        }
        Ok(segments)
    }

    /// Segments must be followed by `/`, the end of input, or `}` inside a sub-pattern.
    fn expect_delimiter(&self, in_variable: bool) -> Result<(), TemplateError> {
        match self.lexer.peek() {
            Token::Slash | Token::EndOfInput => Ok(()),
            Token::RightBrace if in_variable => Ok(()),
            _ if self.seen_double_star => Err(TemplateError::IllegalDoubleStarPlacement),
            other => Err(TemplateError::UnexpectedToken {
                expected: "'/' between segments",
                found: other.to_string(),
            }),
        }
    }
}
