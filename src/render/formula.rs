use maud::{html, Markup};
use thiserror::Error;

use super::Typesetter;

/// Ways an expression can fail to parse
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("'{0}' must be followed by digits")]
    DanglingScript(char),
    #[error("unclosed '{0}' emphasis marker")]
    UnclosedEmphasis(&'static str),
    #[error("empty expression")]
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Text(String),
    Superscript(String),
    Subscript(String),
    Bold(String),
    Italic(String),
}

/// Lightweight expression renderer
///
/// Supports superscript via `^digits`, subscript via `_digits`, and
/// bold/italic emphasis via `**..**` / `*..*`. Not a full math engine; it
/// covers the notation cards actually use and rejects anything malformed so
/// the caller can fall back to literal text.
#[derive(Debug, Default, Clone)]
pub struct BasicTypesetter;

impl BasicTypesetter {
    pub fn new() -> Self {
        Self
    }

    fn tokenize(expr: &str) -> Result<Vec<Token>, FormulaError> {
        let chars: Vec<char> = expr.chars().collect();
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut i = 0;

        let mut flush = |text: &mut String, tokens: &mut Vec<Token>| {
            if !text.is_empty() {
                tokens.push(Token::Text(std::mem::take(text)));
            }
        };

        while i < chars.len() {
            match chars[i] {
                marker @ ('^' | '_') => {
                    let digits: String = chars[i + 1..]
                        .iter()
                        .take_while(|c| c.is_ascii_digit())
                        .collect();
                    if digits.is_empty() {
                        return Err(FormulaError::DanglingScript(marker));
                    }
                    flush(&mut text, &mut tokens);
                    i += 1 + digits.len();
                    tokens.push(if marker == '^' {
                        Token::Superscript(digits)
                    } else {
                        Token::Subscript(digits)
                    });
                }
                '*' => {
                    let bold = chars[i + 1..].first() == Some(&'*');
                    let (skip, closer, label) = if bold { (2, "**", "**") } else { (1, "*", "*") };
                    let rest: String = chars[i + skip..].iter().collect();
                    let close = rest
                        .find(closer)
                        .filter(|&offset| offset > 0 && !rest[..offset].contains('*'))
                        .ok_or(FormulaError::UnclosedEmphasis(label))?;

                    flush(&mut text, &mut tokens);
                    let body = rest[..close].to_string();
                    tokens.push(if bold {
                        Token::Bold(body.clone())
                    } else {
                        Token::Italic(body.clone())
                    });
                    i += skip + body.chars().count() + skip;
                }
                c => {
                    text.push(c);
                    i += 1;
                }
            }
        }

        flush(&mut text, &mut tokens);

        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }

        Ok(tokens)
    }
}

impl Typesetter for BasicTypesetter {
    fn typeset(&self, expr: &str, display: bool) -> Result<Markup, FormulaError> {
        let tokens = Self::tokenize(expr)?;

        let class = if display { "math math-display" } else { "math" };

        Ok(html! {
            span class=(class) {
                @for token in &tokens {
                    @match token {
                        Token::Text(text) => { (text) }
                        Token::Superscript(digits) => { sup { (digits) } }
                        Token::Subscript(digits) => { sub { (digits) } }
                        Token::Bold(body) => { strong { (body) } }
                        Token::Italic(body) => { em { (body) } }
                    }
                }
            }
        })
    }
}
