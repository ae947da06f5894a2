use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use proptest::prelude::*;
use proptest::strategy::ValueTree;
use proptest::test_runner::TestRunner;
use refa::compile::{compile, Automaton};
use refa::dfa::Dfa;
use refa::format;
use regex::Regex as LibRegex;

// A couple of DFAs over a small shared alphabet, big enough to make the powerset/equivalence
// benchmarks do real work without needing to load fixture files from disk.
const DFA_TABLE_1: &str = "
       a  b  c
  -> * s0 s1 s0 s2
       s1 s2 s1 s1
     * s2 s2 s2 s2
";

const DFA_TABLE_2: &str = "
     a b c
-> * x z x y
    y y y y
    z y w z
    w y z w
";

// A regex exercising every construct this compiler supports: union, concatenation and chained
// star, nested through several levels of parentheses.
const BENCH_REGEX: &str = "(a|b)*abb(a|b)*c(a|b|c)**";

lazy_static! {
    static ref DFA1: Dfa = format::dfa(DFA_TABLE_1).unwrap().try_into().unwrap();
    static ref DFA2: Dfa = format::dfa(DFA_TABLE_2).unwrap().try_into().unwrap();
}

pub fn powerset(c: &mut Criterion) {
    c.bench_function("union", |b| b.iter(|| DFA1.union(black_box(&DFA2))));
    c.bench_function("intersection", |b| {
        b.iter(|| DFA1.intersection(black_box(&DFA2)))
    });
    c.bench_function("difference", |b| {
        b.iter(|| DFA1.difference(black_box(&DFA2)))
    });
    c.bench_function("symmetric difference", |b| {
        b.iter(|| DFA1.symmetric_difference(black_box(&DFA2)))
    });
}

pub fn equivalence_check(c: &mut Criterion) {
    c.bench_function("equivalence check", |b| {
        b.iter(|| DFA1.equivalent_to(black_box(&DFA2)))
    });
}

pub fn regex_compile(c: &mut Criterion) {
    c.bench_function("refa regex compile", |b| {
        b.iter(|| {
            let input = black_box(BENCH_REGEX);
            compile(input, true).unwrap()
        })
    });

    c.bench_function("library regex compile", |b| {
        b.iter(|| {
            let input = black_box(BENCH_REGEX);
            LibRegex::new(input).unwrap()
        })
    });
}

pub fn regex_check(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let string_gen = "[abc]+".new_tree(&mut runner).unwrap();

    let Automaton::Dfa(mut dfa) = compile(BENCH_REGEX, true).unwrap() else {
        unreachable!("compile(.., true) always returns a Dfa")
    };
    dfa.minimize();

    c.bench_function("refa regex check", |b| {
        b.iter(|| dfa.accepts_graphemes(black_box(&string_gen.current())))
    });

    let mut runner = TestRunner::default();
    let string_gen = "[abc]+".new_tree(&mut runner).unwrap();
    let input_regex = format!("^({BENCH_REGEX})$");
    let regex = LibRegex::new(&input_regex).unwrap();
    c.bench_function("library regex check", |b| {
        b.iter(|| regex.is_match(black_box(&string_gen.current())))
    });
}

criterion_group!(
    benches,
    equivalence_check,
    powerset,
    regex_compile,
    regex_check
);
criterion_main!(benches);
