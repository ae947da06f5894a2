use clap::{Parser, Subcommand};
use refa::compile::{compile, Automaton, CompilationError};
use thiserror::Error;

/// Compile a tiny regex language into a finite automaton and run it against input strings.
#[derive(Debug, Parser)]
#[command(name = "refa", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compile a regex and print its automaton in refa's table format.
    Compile {
        /// The regex source, e.g. "(a|b)*c".
        regex: String,
        /// Determinize the result into a DFA instead of printing the raw Thompson NFA.
        #[arg(long)]
        dfa: bool,
    },
    /// Compile a regex and report whether it accepts each given string.
    Test {
        /// The regex source, e.g. "(a|b)*c".
        regex: String,
        /// Strings to test for acceptance.
        inputs: Vec<String>,
        /// Simulate the Thompson NFA directly instead of determinizing first.
        #[arg(long)]
        nfa: bool,
    },
}

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    Compilation(#[from] CompilationError),
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    match args.command {
        Command::Compile { regex, dfa } => {
            let table = match compile(&regex, dfa)? {
                Automaton::Nfa(nfa) => nfa.to_table(),
                Automaton::Dfa(dfa) => dfa.to_table(),
            };
            print!("{table}");
        }
        Command::Test { regex, inputs, nfa } => {
            let automaton = compile(&regex, !nfa)?;
            for input in &inputs {
                println!("{input}: {}", automaton.accepts(input));
            }
        }
    }
    Ok(())
}
