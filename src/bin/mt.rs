//! Shared-memory threaded red/black relaxation CLI.

use std::process;

use rbgrid::{RunConfig, solve_threaded};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <gridsize> <iterations> <threads>", args[0]);
        process::exit(1);
    }

    let config = RunConfig {
        gridsize: parse_arg(&args[1], "gridsize"),
        iterations: parse_arg(&args[2], "iterations"),
        workers: parse_arg(&args[3], "threads"),
    };
    if let Err(err) = config.validate() {
        eprintln!("{err}");
        process::exit(1);
    }

    let solution = solve_threaded(&config).unwrap_or_else(|err| {
        eprintln!("{err}");
        process::exit(1);
    });

    println!("{}", solution.report_line(0, config.workers));
    if config.gridsize <= 10 {
        print!("{}", solution.grid);
    }
}

fn parse_arg(raw: &str, name: &str) -> usize {
    raw.parse().unwrap_or_else(|_| {
        eprintln!("{name} must be a non-negative integer, got '{raw}'");
        process::exit(1);
    })
}
