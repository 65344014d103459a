extern crate splitsat;

use std::{path::PathBuf, process, time::Instant};

use clap::{Parser, ValueEnum};
use splitsat::input::{self, ClauseCount, InputConfig, InputFormat};
use splitsat::Isolation;

use thiserror::Error;

#[derive(Error, Debug)]
enum Error {
    #[error("failed to parse input")]
    ParsingError(#[from] input::InputError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// A header line, then one clause per line without terminating zeros
    Lines,
    /// DIMACS CNF
    Dimacs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Branching {
    /// Deep copy the formula for every branch
    Duplicate,
    /// Edit one formula in place and roll back on backtrack
    Trail,
}

#[derive(Parser, Debug)]
#[command(name = "evaluate_clauses", about = "Decide satisfiability of a CNF problem file")]
struct Args {
    /// Path to the problem file
    path: PathBuf,

    #[arg(long, value_enum, default_value = "lines")]
    format: Format,

    /// Read exactly this many clauses instead of reading to the end of the file
    #[arg(long)]
    clauses: Option<usize>,

    #[arg(long, value_enum, default_value = "trail")]
    isolation: Branching,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(err) = run(&args) {
        eprintln!("{}", err);
        if let Error::ParsingError(cause) = &err {
            eprintln!("caused by: {}", cause);
        }
        eprintln!("execution failed");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let format = match args.format {
        Format::Lines => InputFormat::ClauseLines,
        Format::Dimacs => InputFormat::Dimacs,
    };
    let clause_count = match args.clauses {
        Some(n) => ClauseCount::Declared(n),
        None => ClauseCount::UntilExhausted,
    };
    let isolation = match args.isolation {
        Branching::Duplicate => Isolation::Duplicate,
        Branching::Trail => Isolation::Trail,
    };

    let config = InputConfig::new(&args.path)
        .with_format(format)
        .with_clause_count(clause_count);
    let instance = input::parse(&config)?;

    let start = Instant::now();
    let solution = instance.solve_with(isolation);
    let elapsed = start.elapsed().as_secs_f64();

    if solution.satisfiable {
        println!("SOLUTION FOUND in {} seconds", elapsed);
    } else {
        println!("NO SOLUTION in {} seconds", elapsed);
    }
    log::info!("{:?}", solution);
    Ok(())
}
