use std::env::args;

use pretty_env_logger::formatted_builder;
use satchel::{
    bench,
    fit::{self, Quadratic},
    parser::{self, parse_file},
    prelude::*,
    report::Report,
    solver::{DpllSolver, Solver},
};

fn usage_string() -> String {
    format!(
        "Usage: {} <command>

command:
    check <file_name> - solve every problem in the file and print verdicts
    bench <file_name> - time every solve, fit a quadratic, print a chart",
        args().next().unwrap()
    )
}

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Unknown command '{}'\n\n{}", name, usage_string()))]
    UnknownCommand { name: String },
    #[snafu(display("Failed to parse CNF batch"))]
    ParserError { source: parser::Error },
    #[snafu(display("Required argument does not exist\n\n{}", usage_string()))]
    MissingArgument,
}

fn check_command(args: Vec<String>) -> Result<(), Error> {
    let path = args.get(0).context(MissingArgument)?;
    let problems = parse_file(path).context(ParserError)?;

    for problem in problems {
        let number = problem.number;
        match DpllSolver::new(problem.formula).solve() {
            Some(model) => println!("problem {}: SAT {}", number, model),
            None => println!("problem {}: UNSAT", number),
        }
    }

    Ok(())
}

fn bench_command(args: Vec<String>) -> Result<(), Error> {
    let path = args.get(0).context(MissingArgument)?;
    let problems = parse_file(path).context(ParserError)?;

    let records = bench::run::<DpllSolver>(problems);

    for record in &records {
        println!(
            "problem {:>4}  {:>6} clauses  {:>12?}  {}",
            record.problem,
            record.size,
            record.elapsed,
            if record.satisfiable { "SAT" } else { "UNSAT" },
        );
    }

    let points: Vec<(f64, f64)> = records
        .iter()
        .map(|record| (record.size as f64, record.elapsed.as_secs_f64()))
        .collect();

    match Quadratic::fit(&points) {
        Some(curve) => {
            println!("\nfit: {}", curve);
            println!("{}", fit::scatter_chart(&points, &curve, 60, 20));
        }
        None => println!("\nnot enough distinct problem sizes for a fit"),
    }

    let summary = bench::summarize(&records);
    println!("satisfiable: {} / {}", summary.satisfiable, summary.total);

    Ok(())
}

fn init_logger() {
    let mut builder = formatted_builder();

    if let Ok(s) = ::std::env::var("RUST_LOG") {
        builder.parse_filters(&s);
    } else {
        if cfg!(debug_assertions) {
            builder.parse_filters("satchel=debug");
        } else {
            builder.parse_filters("satchel=warn");
        }
    }

    builder.try_init().expect("Failed to initialize the logger");
}

fn main() -> Result<(), Report> {
    init_logger();

    let mut args = args();

    // drop arg[0]
    args.next();

    let command = args.next();
    let remaining: Vec<_> = args.collect();

    match command.as_deref() {
        Some("check") => check_command(remaining)?,
        Some("bench") => bench_command(remaining)?,
        Some(name) => UnknownCommand {
            name: name.to_owned(),
        }
        .fail()?,
        None => {
            println!("{}", usage_string());
        }
    }

    Ok(())
}
