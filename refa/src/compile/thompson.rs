//! Thompson's construction: [Ast] → [Nfa], one fragment per node, composed bottom-up.

use crate::ast::Ast;
use crate::nfa::{Nfa, NfaState};
use std::collections::BTreeSet;
use std::rc::Rc;

/// A start/accept pair identifying the two boundary states of a freshly built fragment.
type Fragment = (usize, usize);

struct Builder {
    states: Vec<NfaState>,
    alphabet: Rc<[Rc<str>]>,
    symbol_index: std::collections::HashMap<char, usize>,
}

impl Builder {
    fn fresh_state(&mut self) -> usize {
        let idx = self.states.len();
        self.states.push(NfaState {
            name: Rc::from(idx.to_string()),
            initial: false,
            accepting: false,
            epsilon_transitions: Vec::new(),
            transitions: vec![Vec::new(); self.alphabet.len()],
        });
        idx
    }

    fn add_epsilon(&mut self, from: usize, to: usize) {
        self.states[from].epsilon_transitions.push(to);
    }

    fn add_symbol(&mut self, from: usize, symbol: char, to: usize) {
        let idx = self.symbol_index[&symbol];
        self.states[from].transitions[idx].push(to);
    }

    /// Builds a fragment for `node`, visiting children before minting any new state belonging to
    /// `node` itself (post-order), so state identifiers increase in a deterministic order.
    fn build(&mut self, node: &Ast) -> Fragment {
        match node {
            Ast::Symbol(c) => {
                let s_in = self.fresh_state();
                let s_out = self.fresh_state();
                self.add_symbol(s_in, *c, s_out);
                (s_in, s_out)
            }
            Ast::Concat(left, right) => {
                let (l_in, l_out) = self.build(left);
                let (r_in, r_out) = self.build(right);
                self.add_epsilon(l_out, r_in);
                (l_in, r_out)
            }
            Ast::Union(left, right) => {
                let (l_in, l_out) = self.build(left);
                let (r_in, r_out) = self.build(right);
                let s_in = self.fresh_state();
                let s_out = self.fresh_state();
                self.add_epsilon(s_in, l_in);
                self.add_epsilon(s_in, r_in);
                self.add_epsilon(l_out, s_out);
                self.add_epsilon(r_out, s_out);
                (s_in, s_out)
            }
            Ast::Star(child) => {
                let (c_in, c_out) = self.build(child);
                let s_in = self.fresh_state();
                let s_out = self.fresh_state();
                self.add_epsilon(s_in, c_in);
                self.add_epsilon(s_in, s_out);
                self.add_epsilon(c_out, c_in);
                self.add_epsilon(c_out, s_out);
                (s_in, s_out)
            }
        }
    }
}

fn collect_symbols(node: &Ast, into: &mut BTreeSet<char>) {
    match node {
        Ast::Symbol(c) => {
            into.insert(*c);
        }
        Ast::Concat(l, r) | Ast::Union(l, r) => {
            collect_symbols(l, into);
            collect_symbols(r, into);
        }
        Ast::Star(c) => collect_symbols(c, into),
    }
}

/// Builds an NFA from `ast` following the per-shape construction in §4.3: the resulting NFA has
/// exactly one start state and one accepting state, the accepting state has no outgoing
/// transitions, and its alphabet is exactly the set of `Symbol` characters appearing in `ast`.
pub fn build_nfa(ast: &Ast) -> Nfa {
    let mut symbols = BTreeSet::new();
    collect_symbols(ast, &mut symbols);

    let alphabet: Rc<[Rc<str>]> = symbols.iter().map(|c| Rc::from(c.to_string())).collect();
    let symbol_index = symbols.into_iter().enumerate().map(|(i, c)| (c, i)).collect();

    let mut builder = Builder { states: Vec::new(), alphabet: alphabet.clone(), symbol_index };
    let (start, accept) = builder.build(ast);
    builder.states[start].initial = true;
    builder.states[accept].accepting = true;

    Nfa {
        alphabet,
        states: builder.states,
        initial_state: start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast;
    use crate::lexer;

    fn nfa_for(pattern: &str) -> Nfa {
        let tokens = lexer::tokenize(pattern).unwrap();
        let tree = ast::parse(&tokens).unwrap();
        build_nfa(&tree)
    }

    #[test]
    fn single_accepting_state_with_no_outgoing_transitions() {
        for pattern in ["a", "a|b", "ab", "a*", "(a|b)*c", "a**"] {
            let nfa = nfa_for(pattern);
            let accepting: Vec<_> = nfa.states().iter().filter(|s| s.is_accepting()).collect();
            assert_eq!(accepting.len(), 1, "pattern {pattern} should have exactly one accepting state");
            let accept = accepting[0];
            assert!(accept.epsilon_transitions().is_empty());
            assert!(accept.transitions().iter().all(|t| t.is_empty()));
        }
    }

    #[test]
    fn alphabet_is_exactly_the_symbols_used() {
        let nfa = nfa_for("(a|b)*c");
        let mut alphabet: Vec<_> = nfa.alphabet().iter().map(|s| s.chars().next().unwrap()).collect();
        alphabet.sort_unstable();
        assert_eq!(alphabet, vec!['a', 'b', 'c']);
    }

    #[test]
    fn repeated_compilation_is_deterministic() {
        let first = nfa_for("(a|b)*c");
        let second = nfa_for("(a|b)*c");
        assert_eq!(first.states().len(), second.states().len());
        assert_eq!(first, second);
    }
}
