use clap::{App, Arg};
use env_logger::{Builder, Env};
use forksat::{Instance, ParallelSolver, Solution};
use std::thread;

fn main() {
    Builder::from_env(Env::default().filter_or("RUST_LOG", "info")).init();

    let matches = App::new("forksat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A parallel DPLL SAT solver")
        .arg(
            Arg::with_name("file")
                .index(1)
                .required(true)
                .help("Input file in DIMACS CNF format"),
        )
        .get_matches();

    let input_file = matches.value_of("file").unwrap();
    let clauses = match forksat::parser::parse_dimacs_file(input_file) {
        Ok(clauses) => clauses,
        Err(e) => {
            log::error!("{}: {}", input_file, e);
            std::process::exit(1);
        }
    };

    let instance = Instance::new(clauses);
    let thread_count = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    log::info!(
        "{} variables, {} clauses, {} worker threads",
        instance.n_vars(),
        instance.n_clauses(),
        thread_count
    );

    let solver = ParallelSolver::new(instance, thread_count);
    match solver.solve() {
        Solution::Sat(model) => {
            log::debug!(
                "model:{}",
                model
                    .iter()
                    .enumerate()
                    .map(|(v, &value)| {
                        format!(" {}", if value { v as i64 + 1 } else { -(v as i64 + 1) })
                    })
                    .collect::<String>()
            );
            println!("SAT");
            std::process::exit(10);
        }
        Solution::Unsat => {
            println!("UNSAT");
            std::process::exit(20);
        }
    }
}
