//! Sequential red/black relaxation CLI.

use std::process;

use rbgrid::{RunConfig, solve_sequential};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <gridsize> <iterations>", args[0]);
        process::exit(1);
    }

    let config = RunConfig {
        gridsize: parse_arg(&args[1], "gridsize"),
        iterations: parse_arg(&args[2], "iterations"),
        workers: 1,
    };
    if let Err(err) = config.validate() {
        eprintln!("{err}");
        process::exit(1);
    }

    let solution = solve_sequential(&config).unwrap_or_else(|err| {
        eprintln!("{err}");
        process::exit(1);
    });

    println!("{}", solution.report_line(0, 1));
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
