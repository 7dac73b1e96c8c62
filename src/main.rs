//! LR(1) parser generator and driver.
//!
//! Run `cargo doc --open` to view this documentation in a browser.

#![warn(missing_docs)] // friendly reminder to add comments
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::all)]

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use colored::Colorize;

use lrgen::{
    grammar::{printing::print_grammar, Grammar},
    parser::{tokenize, Driver},
    profile::Profiler,
    table::{
        generate,
        printing::{print_conflict, print_states, print_table},
    },
};

/// Command line arguments accepted by the generator
#[derive(Clone, PartialEq, Eq, Parser)]
#[command(version, about)]
struct Args {
    /// Load grammar from file
    #[arg(short)]
    grammar: PathBuf,
    /// Input string of space-separated terminal names
    #[arg(short = 's')]
    input: Option<String>,
    /// Save parsing table as CSV
    #[arg(short = 'o')]
    csv: Option<PathBuf>,
    /// Benchmark mode, show timings and disable output
    #[arg(short)]
    benchmark: bool,
    /// Save profiling data as JSON (implies benchmark mode)
    #[arg(short)]
    profile: Option<PathBuf>,
    /// Set column length for parsing result table
    #[arg(short = 'l', default_value_t = 20)]
    col_width: usize,
}

/// Elapsed time of a phase, in the microsecond format of benchmark mode
fn micros(start: Instant) -> f64 {
    start.elapsed().as_nanos() as f64 / 1000.0
}

fn main() -> ExitCode {
    // parse command line arguments
    let args = Args::parse();

    // initialize logging; grammar warnings are visible without RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let benchmark = args.benchmark || args.profile.is_some();

    let profiler = match args.profile.as_deref().map(Profiler::create).transpose() {
        Ok(profiler) => profiler,
        Err(e) => {
            eprintln!("{} Failed to create profile file: {}", "[ERROR]".red(), e);
            return ExitCode::FAILURE;
        }
    };

    // load grammar and compute FIRST()
    println!(
        "{}",
        format!("Loading grammar from file: {}", args.grammar.display()).green()
    );
    let start = Instant::now();
    let grammar = {
        let _span = profiler.as_ref().map(|p| p.span("load grammar"));
        match Grammar::from_file(&args.grammar) {
            Ok(grammar) => grammar,
            Err(e) => {
                eprintln!("{} Failed to load grammar: {}", "[ERROR]".red(), e);
                return ExitCode::FAILURE;
            }
        }
    };
    if benchmark {
        println!("Grammar loading time: {} us", micros(start));
    } else {
        print_grammar(&grammar);
    }

    // build the parsing table
    let start = Instant::now();
    let generation = {
        let _span = profiler.as_ref().map(|p| p.span("generate table"));
        generate(&grammar)
    };
    if benchmark {
        println!("Parsing table building time: {} us", micros(start));
    } else {
        print_states(&generation.states, &grammar);
        print_table(&generation.table, &grammar);
    }
    for conflict in &generation.conflicts {
        print_conflict(conflict, &grammar);
    }

    if let Some(path) = &args.csv {
        let _span = profiler.as_ref().map(|p| p.span("write csv"));
        let try_catch = || {
            let mut file = BufWriter::new(File::create(path)?);
            generation.table.write_csv(&mut file, &grammar)?;
            file.flush()
        };
        if let Err(e) = try_catch() {
            eprintln!("{} Failed to write CSV table: {}", "[ERROR]".red(), e);
            return ExitCode::FAILURE;
        }
    }

    // parse
    if let Some(input) = &args.input {
        let start = Instant::now();
        let terminals = {
            let _span = profiler.as_ref().map(|p| p.span("tokenize"));
            match tokenize(input, &grammar) {
                Ok(terminals) => terminals,
                Err(e) => {
                    eprintln!("{} {}", "[ERROR]".red(), e);
                    return ExitCode::FAILURE;
                }
            }
        };

        let mut driver = Driver::new(&grammar, &generation.table);
        if !benchmark {
            driver = driver.with_trace(args.col_width);
        }

        let outcome = {
            let _span = profiler.as_ref().map(|p| p.span("parse"));
            driver.parse(&terminals)
        };
        // a rejection is reported but is not a process failure
        if let Err(rejection) = outcome {
            println!("{}", rejection.describe(&grammar));
        }

        if benchmark {
            println!("Parsing time: {} us", micros(start));
        }
    }

    if let Some(profiler) = profiler {
        if let Err(e) = profiler.finish() {
            eprintln!("{} Failed to finish profile file: {}", "[ERROR]".red(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
