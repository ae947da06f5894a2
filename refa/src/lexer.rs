//! # Lexical scanner
//! The lexer turns a source regex string into a flat sequence of [Token]s, the input the
//! [parser](crate::ast) consumes. It recognizes exactly six kinds of token and skips whitespace
//! between them; anything else is a [LexicalError].
//!
//! ```
//! use refa::lexer::{self, TokenKind};
//!
//! let tokens = lexer::tokenize("a|b*").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Symbol,
//!         TokenKind::Union,
//!         TokenKind::Symbol,
//!         TokenKind::Star,
//!         TokenKind::End,
//!     ]
//! );
//!
//! assert!(lexer::tokenize("a#b").is_err());
//! ```

use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The kind of a single [Token]. `End` is emitted exactly once, as the last token of every
/// successful tokenization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Symbol,
    Union,
    Star,
    LParen,
    RParen,
    End,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TokenKind::Symbol => "a symbol",
            TokenKind::Union => "'|'",
            TokenKind::Star => "'*'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::End => "end of input",
        };
        f.write_str(s)
    }
}

/// A single scanned token: its kind, the character it was scanned from (`None` for `End`), and
/// the byte offset of that character in the original source (counting skipped whitespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<char>,
    pub position: usize,
}

/// Raised when the lexer encounters a character that is neither alphanumeric nor one of the four
/// metacharacters `| * ( )`, nor whitespace. Tokenization aborts at the first such character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unexpected character '{character}' at position {position}")]
pub struct LexicalError {
    pub character: char,
    pub position: usize,
}

const WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// Scans `source` into a token sequence terminated by a single `End` token. Whitespace (space,
/// tab, newline, carriage return) is skipped and never produces a token, but still counts towards
/// the position of the tokens that follow it.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut tokens = Vec::new();
    for (position, c) in source.char_indices() {
        if WHITESPACE.contains(&c) {
            continue;
        }
        let kind = match c {
            c if c.is_ascii_alphanumeric() => TokenKind::Symbol,
            '|' => TokenKind::Union,
            '*' => TokenKind::Star,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => return Err(LexicalError { character: other, position }),
        };
        tokens.push(Token { kind, lexeme: Some(c), position });
    }
    tokens.push(Token {
        kind: TokenKind::End,
        lexeme: None,
        position: source.len(),
    });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_whitespace_but_counts_it_in_positions() {
        let tokens = tokenize("  a b").unwrap();
        assert_eq!(tokens[0], Token { kind: TokenKind::Symbol, lexeme: Some('a'), position: 2 });
        assert_eq!(tokens[1], Token { kind: TokenKind::Symbol, lexeme: Some('b'), position: 4 });
        assert_eq!(tokens[2].kind, TokenKind::End);
    }

    #[test]
    fn recognizes_every_token_kind() {
        let tokens = tokenize("a|*()").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Symbol,
                TokenKind::Union,
                TokenKind::Star,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn empty_or_whitespace_only_input_yields_only_end() {
        assert_eq!(tokenize("").unwrap().len(), 1);
        assert_eq!(tokenize("   \t\n").unwrap().len(), 1);
    }

    #[test]
    fn rejects_illegal_character() {
        let err = tokenize("a#b").unwrap_err();
        assert_eq!(err, LexicalError { character: '#', position: 1 });
    }

    #[test]
    fn rejects_first_illegal_character_without_recovery() {
        let err = tokenize("##").unwrap_err();
        assert_eq!(err.position, 0);
    }

    #[test]
    fn digits_are_symbols() {
        let tokens = tokenize("0a9Z").unwrap();
        assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Symbol));
    }
}
