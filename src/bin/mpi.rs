//! Distributed red/black relaxation CLI, one rank per strip.
//!
//! Launch under an MPI runner:
//!
//! ```text
//! mpirun -n 4 rbgrid-mpi 1024 500
//! ```

use mpi::topology::SimpleCommunicator;
use mpi::traits::*;

use rbgrid::compute::solve_distributed;

fn main() {
    env_logger::init();

    let universe = mpi::initialize().expect("MPI initialization failed");
    let world = universe.world();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        if world.rank() == 0 {
            eprintln!(
                "Usage: mpirun -n <ranks> {} <gridsize> <iterations>",
                args[0]
            );
        }
        world.abort(1);
    }

    let gridsize = parse_arg(&world, &args[1], "gridsize");
    let iterations = parse_arg(&world, &args[2], "iterations");

    let solution = solve_distributed(&world, gridsize, iterations).unwrap_or_else(|err| {
        eprintln!("{err}");
        world.abort(1);
    });

    if world.rank() == 0 {
        println!("{}", solution.report_line(world.size() as usize, 0));
    }
}

fn parse_arg(world: &SimpleCommunicator, raw: &str, name: &str) -> usize {
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            if world.rank() == 0 {
                eprintln!("{name} must be a non-negative integer, got '{raw}'");
            }
            world.abort(1)
        }
    }
}
