//! # Syntax tree and recursive-descent parser
//! The parser consumes the token sequence produced by [tokenize](crate::lexer::tokenize) and
//! builds an [Ast] honoring the usual precedence of regular-expression operators (union binds
//! loosest, then concatenation, then postfix star; parentheses override both):
//!
//! ```text
//! regex  := union
//! union  := concat ('|' concat)*
//! concat := star (star)*
//! star   := atom ('*')*
//! atom   := SYMBOL | '(' union ')'
//! ```
//!
//! ```
//! use refa::ast::{self, Ast};
//! use refa::lexer;
//!
//! let tokens = lexer::tokenize("a|b*").unwrap();
//! let tree = ast::parse(&tokens).unwrap();
//! assert_eq!(
//!     tree,
//!     Ast::Union(
//!         Box::new(Ast::Symbol('a')),
//!         Box::new(Ast::Star(Box::new(Ast::Symbol('b')))),
//!     )
//! );
//!
//! assert!(ast::parse(&lexer::tokenize("").unwrap()).is_err());
//! assert!(ast::parse(&lexer::tokenize("(a").unwrap()).is_err());
//! assert!(ast::parse(&lexer::tokenize("|a").unwrap()).is_err());
//! ```

use crate::lexer::{Token, TokenKind};
use thiserror::Error;

/// A node of the syntax tree. Exactly four shapes exist; there is no separate "empty" or
/// "epsilon" variant, since the grammar never produces one (an empty input is rejected by the
/// parser before a tree is built at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// A single alphanumeric character.
    Symbol(char),
    /// `left` followed by `right`.
    Concat(Box<Ast>, Box<Ast>),
    /// `left` or `right`.
    Union(Box<Ast>, Box<Ast>),
    /// Zero or more repetitions of `child`.
    Star(Box<Ast>),
}

/// Raised by the parser on any grammar violation: a missing atom, an unmatched parenthesis, a
/// stray operator, trailing tokens after a complete expression, or an empty input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    fn at(token: &Token, message: impl Into<String>) -> Self {
        SyntaxError { message: message.into(), position: token.position }
    }
}

/// Parses a complete token sequence (as produced by [tokenize](crate::lexer::tokenize), i.e.
/// terminated by a single `End` token) into an [Ast]. Fails if the sequence is empty (only
/// whitespace was tokenized), doesn't form a complete `union`, or leaves tokens unconsumed.
pub fn parse(tokens: &[Token]) -> Result<Ast, SyntaxError> {
    if tokens.first().map(|t| t.kind) == Some(TokenKind::End) {
        return Err(SyntaxError { message: "empty expression".to_string(), position: 0 });
    }

    let mut parser = Parser { tokens, pos: 0 };
    let tree = parser.union()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::End {
        return Err(SyntaxError::at(
            trailing,
            format!("unexpected {} after a complete expression", trailing.kind),
        ));
    }
    Ok(tree)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> &'a Token {
        let token = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn union(&mut self) -> Result<Ast, SyntaxError> {
        let mut node = self.concat()?;
        while self.peek().kind == TokenKind::Union {
            self.advance();
            let rhs = self.concat()?;
            node = Ast::Union(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn concat(&mut self) -> Result<Ast, SyntaxError> {
        let mut node = self.star()?;
        while matches!(self.peek().kind, TokenKind::Symbol | TokenKind::LParen) {
            let rhs = self.star()?;
            node = Ast::Concat(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    fn star(&mut self) -> Result<Ast, SyntaxError> {
        let mut node = self.atom()?;
        while self.peek().kind == TokenKind::Star {
            self.advance();
            node = Ast::Star(Box::new(node));
        }
        Ok(node)
    }

    fn atom(&mut self) -> Result<Ast, SyntaxError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Symbol => {
                let c = token.lexeme.expect("a Symbol token always carries a lexeme");
                self.advance();
                Ok(Ast::Symbol(c))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.union()?;
                let close = self.peek();
                if close.kind != TokenKind::RParen {
                    return Err(SyntaxError::at(
                        close,
                        format!("expected ')' but found {}", close.kind),
                    ));
                }
                self.advance();
                Ok(inner)
            }
            _ => Err(SyntaxError::at(token, format!("expected an atom but found {}", token.kind))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(s: &str) -> Result<Ast, SyntaxError> {
        parse(&tokenize(s).unwrap())
    }

    #[test]
    fn single_symbol() {
        assert_eq!(parse_str("a").unwrap(), Ast::Symbol('a'));
    }

    #[test]
    fn concat_is_left_leaning() {
        assert_eq!(
            parse_str("abc").unwrap(),
            Ast::Concat(
                Box::new(Ast::Concat(Box::new(Ast::Symbol('a')), Box::new(Ast::Symbol('b')))),
                Box::new(Ast::Symbol('c')),
            )
        );
    }

    #[test]
    fn union_binds_looser_than_concat() {
        // a|bc means a|(bc), not (a|b)c
        assert_eq!(
            parse_str("a|bc").unwrap(),
            Ast::Union(
                Box::new(Ast::Symbol('a')),
                Box::new(Ast::Concat(Box::new(Ast::Symbol('b')), Box::new(Ast::Symbol('c')))),
            )
        );
    }

    #[test]
    fn star_binds_tighter_than_concat() {
        // ab* means a(b*)
        assert_eq!(
            parse_str("ab*").unwrap(),
            Ast::Concat(Box::new(Ast::Symbol('a')), Box::new(Ast::Star(Box::new(Ast::Symbol('b'))))),
        );
    }

    #[test]
    fn parens_override_precedence() {
        assert_eq!(
            parse_str("(a|b)*").unwrap(),
            Ast::Star(Box::new(Ast::Union(Box::new(Ast::Symbol('a')), Box::new(Ast::Symbol('b'))))),
        );
    }

    #[test]
    fn chained_stars_preserve_every_node() {
        assert_eq!(
            parse_str("a**").unwrap(),
            Ast::Star(Box::new(Ast::Star(Box::new(Ast::Symbol('a'))))),
        );
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        let err = parse_str("").unwrap_err();
        assert_eq!(err.message, "empty expression");
        let err = parse_str("   ").unwrap_err();
        assert_eq!(err.message, "empty expression");
    }

    #[test]
    fn lone_metacharacters_are_syntax_errors() {
        assert!(parse_str("*").is_err());
        assert!(parse_str("|").is_err());
        assert!(parse_str("(").is_err());
    }

    #[test]
    fn unbalanced_parens_are_syntax_errors() {
        assert!(parse_str("(a").is_err());
        assert!(parse_str("a)").is_err());
        assert!(parse_str("(())").is_err());
    }

    #[test]
    fn missing_atom_around_union_is_a_syntax_error() {
        assert!(parse_str("|a").is_err());
        assert!(parse_str("a|").is_err());
    }
}
