//!# refa
//!
//! `refa` compiles a small regular-expression language straight into a finite automaton, and can
//! simulate that automaton against candidate strings. The compiler is a linear pipeline:
//!
//! ```text
//! string -> tokens -> syntax tree -> NFA -> (optionally) DFA -> accept/reject
//! ```
//!
//! Each stage is pure and lives in its own module: [lexer] turns source text into [lexer::Token]s,
//! [ast] turns tokens into an [ast::Ast] via a recursive-descent parser, and [compile::build_nfa]
//! (Thompson's construction) turns that tree into an [nfa::Nfa]. From there, the compiled
//! automaton is just an [Nfa](nfa::Nfa) like any other this crate can produce or consume — it can
//! be simulated directly, determinized into a [Dfa](dfa::Dfa) with [Nfa::to_dfa](nfa::Nfa::to_dfa),
//! minimized, combined with other automata, or rendered to the crate's plain-text table format.
//! [compile::compile] wraps the whole pipeline into one call.
//!
//! ```
//! use refa::compile::{compile, simulate_dfa, Automaton};
//!
//! let Automaton::Dfa(dfa) = refa::compile::compile("(a|b)*c", true).unwrap() else { unreachable!() };
//! assert!(simulate_dfa(&dfa, "aabc"));
//! assert!(!simulate_dfa(&dfa, "aab"));
//! assert!(refa::compile::compile("", true).is_err());
//! ```
//!
//! ## Concrete syntax
//!
//! The alphabet is ASCII letters and digits. `|` is alternation, `*` is Kleene closure (postfix,
//! chainable), `(` `)` group a sub-expression, and juxtaposition is concatenation. Union binds
//! loosest, then concatenation, then star; whitespace between tokens is ignored. There is no
//! escape mechanism, no character classes, no anchors, and no `?`/`+` quantifiers — see
//! [ast] and [lexer] for the exact grammar.
//!
//! ## The underlying automaton library
//!
//! Independent of the regex compiler, this crate is also a general-purpose DFA/NFA/ε-NFA library
//! with its own plain-text transition-table format, used both by the compiler's tests and by
//! anyone who wants to build or load automata directly.
//!
//! You may parse a state transition table in text form into a DFA. The parsing is done in two
//! steps: the first one parsing into a [ParsedDfa](format::ParsedDfa), and the second one checking
//! the invariants of that parsed DFA and converting it into a [Dfa](dfa::Dfa) with [TryInto]:
//! ```
//! use refa::dfa::Dfa;
//!
//! let raw_dfa = "
//!            a  b  c
//!     → * s₀ s₁ s₀ s₂
//!         s₁ s₂ s₁ s₁
//!       * s₂ s₂ s₂ s₂
//! ";
//! // First pass parses without checking validity of the DFA
//! let parsed_dfa = refa::format::dfa(raw_dfa).unwrap();
//! // Second step checks the existence of all mentioned states and
//! // the existence of an initial state
//! let dfa: Dfa = parsed_dfa.try_into().unwrap();
//! assert!(dfa.accepts(&["a", "b", "c", "c", "a"]));
//! assert!(dfa.accepts(&["c", "b", "a"]));
//! assert!(!dfa.accepts(&["a", "b", "b", "c"]));
//!
//! let equivalent_dfa = "
//!     a b c
//! → * x z x y
//!   * y y y y
//!     z y w z
//!     w y z w
//! ";
//! let dfa2 = refa::format::dfa(equivalent_dfa).unwrap().try_into().unwrap();
//! assert!(dfa.equivalent_to(&dfa2));
//! ```
//!
//! ## File format
//!
//! The file format used is more or less just a transition table. The first row (the header) should include
//! the whole alphabet, and then the rest of the rows should consist of the states, one row for each state.
//! The row should start with the state name and then, for each element of the alphabet, the transition from
//! that state upon seeing that element. Before the state name, either -> or → should be used to denote the
//! initial state, and * to denote that the state is accepting.
//!
//! Example of a DFA:
//!
//! ```text
//!        a  b  c
//! → * s₀ s₁ s₀ s₂
//!     s₁ s₂ s₁ s₁
//!   * s₂ s₂ s₂ s₂
//! ```
//!
//! This table denotes a DFA accepting strings of the alphabet 'a', 'b', 'c' with either
//!
//! * only 'b's
//! * two 'a's
//! * a 'c' before the first occurrence of 'a'
//!
//! Whitespace should be used for delimiters between `→`, `*`, the state name and the transition entries. Lines
//! containing only whitespace will be ignored, and comments may be added using `#`, ignoring the rest of the
//! row. Leading and trailing whitespace is ignored. The entries do not need to be aligned to the other
//! rows or the alphabet.
//!
//! The format for NFAs and ε-NFAs is very similar. For each state transition, a set of target states is denoted by
//! `{`, then the states in a whitespace-separated list, and `}`. To define ε-transitions, the ε character should be
//! added to the alphabet.
//!
//! Example of an ε-NFA:
//!
//! ```text
//!      ε    a       b
//! → s₀ {}   {s₁}    {s₀ s₂}
//!   s₁ {s₂} {s₄}    {s₃}
//!   s₂ {}   {s₁ s₄} {s₃}
//!   s₃ {s₅} {s₄ s₅} {}
//!   s₄ {s₃} {}      {s₅}
//! * s₅ {}   {s₅}    {s₅}
//! ```
//!
//! Again, whitespace should be used for delimiters between `→`, `*`, the state name and the transition entries.
//! Whitespace should also be used as a delimiter between entries in each set. Empty transitions (no transitions)
//! must be written as the empty set `{}`. The same rules for comments and leading and trailing whitespace as for
//! the DFAs apply. `ε` may be written as "eps", and may be absent for denoting a non-ε-NFA.
//!
//! ## Operations
//!
//! This library supports:
//!
//! * Compiling a regex source string straight to an [Nfa](nfa::Nfa) or [Dfa](dfa::Dfa) with [compile::compile]
//! * Running each pipeline stage individually: [lexer::tokenize], [ast::parse], [compile::build_nfa]
//! * [Parsing](format::dfa) and [validating](dfa::parse) DFAs from the plain-text table format
//! * [Parsing](format::nfa) and [validating](nfa::parse) NFAs (with and without epsilon moves)
//! * Generating a table suitable for re-parsing of [DFAs](dfa::Dfa::to_table) and [NFAs](nfa::Nfa::to_table)
//! * Converting [DFAs to NFAs](dfa::Dfa::to_nfa), and [NFAs to DFAs](nfa::Nfa::to_dfa) (subset construction)
//! * [Checking whether two DFAs or two NFAs are equivalent](dfa::Dfa::equivalent_to)
//! * Checking if a string is accepted by a [DFA](dfa::Dfa::accepts) or [NFA](nfa::Nfa::accepts)
//! * [Step-by-step evaluation of a string](dfa::Dfa::evaluator)
//! * [Identifying and removing unreachable states from a DFA](dfa::Dfa::unreachable_states)
//! * [Identifying and merging non-distinguishable states from a DFA](dfa::Dfa::state_equivalence_classes)
//! * [Minimizing a DFA](dfa::Dfa::minimize) (by executing the two above-mentioned steps)

pub mod ast;
pub mod compile;
pub mod dfa;
pub mod format;
pub mod lexer;
pub mod nfa;
mod table;

#[cfg(test)]
mod tests;
