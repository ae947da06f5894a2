//! # Regex compilation pipeline
//! This module ties the [lexer](crate::lexer), the [parser](crate::ast) and the
//! [Thompson constructor](thompson) into the single entry point most callers want:
//! [compile], which turns a source string directly into an [Nfa] or, optionally, a [Dfa].
//!
//! The concrete syntax accepted is exactly: alphanumeric symbols, `|` for alternation, `*` for
//! Kleene closure, `(` `)` for grouping, and whitespace (ignored between tokens). There is no
//! escape mechanism, so none of `| * ( )` can appear as a literal character.
//!
//! ```
//! use refa::compile::{compile, simulate_dfa, simulate_nfa, Automaton};
//!
//! let nfa = match compile("(a|b)*c", false).unwrap() {
//!     Automaton::Nfa(nfa) => nfa,
//!     Automaton::Dfa(_) => unreachable!(),
//! };
//! assert!(simulate_nfa(&nfa, "aabc"));
//! assert!(!simulate_nfa(&nfa, "aab"));
//!
//! let dfa = match compile("(a|b)*c", true).unwrap() {
//!     Automaton::Dfa(dfa) => dfa,
//!     Automaton::Nfa(_) => unreachable!(),
//! };
//! assert!(simulate_dfa(&dfa, "aabc"));
//! assert_eq!(simulate_dfa(&dfa, "aab"), simulate_nfa(&nfa, "aab"));
//!
//! assert!(compile("", false).is_err());
//! assert!(compile("a#b", false).is_err());
//! ```

mod thompson;

pub use thompson::build_nfa;

use crate::ast::{self, Ast, SyntaxError};
use crate::dfa::Dfa;
use crate::lexer::{self, LexicalError};
use crate::nfa::Nfa;
use thiserror::Error;

/// The umbrella error surfaced by [compile]. Wraps whichever pipeline stage failed first with
/// the name of that stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilationError {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

/// The automaton produced by [compile]: an [Nfa] straight off the Thompson construction, or a
/// [Dfa] if the caller asked for determinization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Automaton {
    Nfa(Nfa),
    Dfa(Dfa),
}

impl Automaton {
    /// Decides acceptance of `input`, dispatching to [simulate_nfa] or [simulate_dfa] depending
    /// on which representation this value holds.
    pub fn accepts(&self, input: &str) -> bool {
        match self {
            Automaton::Nfa(nfa) => simulate_nfa(nfa, input),
            Automaton::Dfa(dfa) => simulate_dfa(dfa, input),
        }
    }
}

/// Runs the full pipeline — `tokenize`, `parse`, `build_nfa` and, if `to_dfa` is set,
/// determinization — short-circuiting on the first error. This is the one function most callers
/// need; `tokenize`, `parse` and `build_nfa` remain directly callable for anyone who wants to
/// inspect an intermediate stage.
pub fn compile(source: &str, to_dfa: bool) -> Result<Automaton, CompilationError> {
    let nfa = build_nfa(&parse_source(source)?);
    if to_dfa {
        Ok(Automaton::Dfa(nfa.to_dfa()))
    } else {
        Ok(Automaton::Nfa(nfa))
    }
}

/// `tokenize` then `parse`, wrapped into a single `CompilationError`-returning step. Exposed
/// separately from [compile] since `build_nfa` is infallible and the only two stages that can
/// fail are lexing and parsing.
pub fn parse_source(source: &str) -> Result<Ast, CompilationError> {
    let tokens = lexer::tokenize(source)?;
    Ok(ast::parse(&tokens)?)
}

/// Decides whether `input` is accepted by `nfa`, by running the ε-closure/move simulation of
/// §4.4. A thin wrapper around [Nfa::accepts_graphemes], since the compiler's alphabet consists
/// of single alphanumeric characters, which are always single unicode grapheme clusters.
pub fn simulate_nfa(nfa: &Nfa, input: &str) -> bool {
    nfa.accepts_graphemes(input)
}

/// Decides whether `input` is accepted by `dfa`, one character at a time, rejecting immediately
/// on a character outside the alphabet. A thin wrapper around [Dfa::accepts_graphemes].
pub fn simulate_dfa(dfa: &Dfa, input: &str) -> bool {
    dfa.accepts_graphemes(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dfa_of(pattern: &str) -> Dfa {
        match compile(pattern, true).unwrap() {
            Automaton::Dfa(dfa) => dfa,
            Automaton::Nfa(_) => unreachable!(),
        }
    }

    fn nfa_of(pattern: &str) -> Nfa {
        match compile(pattern, false).unwrap() {
            Automaton::Nfa(nfa) => nfa,
            Automaton::Dfa(_) => unreachable!(),
        }
    }

    #[test]
    fn end_to_end_scenarios() {
        let cases: &[(&str, &str, bool)] = &[
            ("a", "a", true),
            ("a", "b", false),
            ("a|b", "b", true),
            ("ab", "ab", true),
            ("ab", "ba", false),
            ("a*", "", true),
            ("a*", "aaaa", true),
            ("(a|b)*", "abba", true),
            ("(a|b)*c", "aabc", true),
            ("(a|b)*c", "aab", false),
            ("a**", "aaa", true),
        ];
        for &(pattern, input, expected) in cases {
            let nfa = nfa_of(pattern);
            let dfa = dfa_of(pattern);
            assert_eq!(simulate_nfa(&nfa, input), expected, "nfa({pattern}).accepts({input})");
            assert_eq!(simulate_dfa(&dfa, input), expected, "dfa({pattern}).accepts({input})");
        }
    }

    #[test]
    fn nfa_and_dfa_agree_on_every_scenario() {
        for pattern in ["a", "a|b", "ab", "a*", "(a|b)*", "(a|b)*c", "a**"] {
            let nfa = nfa_of(pattern);
            let dfa = dfa_of(pattern);
            for input in ["", "a", "b", "c", "ab", "aabc", "aab", "aaaa", "abba"] {
                assert_eq!(
                    simulate_nfa(&nfa, input),
                    simulate_dfa(&dfa, input),
                    "pattern {pattern}, input {input:?}"
                );
            }
        }
    }

    #[test]
    fn boundary_errors() {
        assert!(matches!(compile("", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("*", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("|", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("(", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("(a", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("a)", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("(())", false), Err(CompilationError::Syntax(_))));
        assert!(matches!(compile("a#b", false), Err(CompilationError::Lexical(_))));
    }

    #[test]
    fn dfa_has_no_epsilon_transitions_and_is_functional_on_alphabet() {
        let dfa = dfa_of("(a|b)*c");
        assert!(!dfa.alphabet().iter().any(|s| s.as_ref() == "\u{3b5}" || s.as_ref() == "eps"));
        for state in dfa.states() {
            assert_eq!(state.transitions().len(), dfa.alphabet().len());
        }
    }

    #[test]
    fn determinism_across_repeated_compiles() {
        let nfa1 = nfa_of("(a|b)*c");
        let nfa2 = nfa_of("(a|b)*c");
        assert_eq!(nfa1.states().len(), nfa2.states().len());
        assert_eq!(nfa1, nfa2);

        let dfa1 = dfa_of("(a|b)*c");
        let dfa2 = dfa_of("(a|b)*c");
        assert_eq!(dfa1.states().len(), dfa2.states().len());
    }
}
