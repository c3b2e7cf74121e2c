//! End-to-end scenarios: DIMACS text through the parser, the instance
//! builder and both solving modes.

use forksat::dpll::SolverState;
use forksat::{parser, Instance, ParallelSolver, Solution};
use std::io::Cursor;

fn instance_from(dimacs: &str) -> Instance {
    let clauses = parser::parse_dimacs_from_buf_reader(&mut Cursor::new(dimacs)).unwrap();
    Instance::new(clauses)
}

fn sequential_verdict(dimacs: &str) -> bool {
    let instance = instance_from(dimacs);
    let mut state = SolverState::new(&instance);
    let sat = state.solve(&instance);
    if sat {
        assert!(instance.satisfied_by(&state.model()));
    }
    sat
}

fn check(dimacs: &str, expect_sat: bool) {
    assert_eq!(sequential_verdict(dimacs), expect_sat, "sequential verdict");
    for &threads in &[1, 4] {
        match ParallelSolver::new(instance_from(dimacs), threads).solve() {
            Solution::Sat(model) => {
                assert!(expect_sat, "expected UNSAT with {} threads", threads);
                assert!(instance_from(dimacs).satisfied_by(&model));
            }
            Solution::Unsat => assert!(!expect_sat, "expected SAT with {} threads", threads),
        }
    }
}

#[test]
fn single_clause() {
    check("p cnf 1 1\n1 0\n", true);
}

#[test]
fn empty_clause() {
    check("p cnf 1 1\n0\n", false);
}

#[test]
fn contradictory_units() {
    check("p cnf 1 2\n1 0\n-1 0\n", false);
}

#[test]
fn forced_chain() {
    let instance = instance_from("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n");
    let mut state = SolverState::new(&instance);
    assert!(state.solve(&instance));
    assert_eq!(state.model(), vec![true, true, true]);
    check("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n", true);
}

#[test]
fn pigeonhole_three_into_two() {
    check(
        "p cnf 6 9\n\
         1 2 0\n3 4 0\n5 6 0\n\
         -1 -3 0\n-1 -5 0\n-3 -5 0\n\
         -2 -4 0\n-2 -6 0\n-4 -6 0\n",
        false,
    );
}

#[test]
fn unsat_triangle() {
    check("p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n", false);
}

#[test]
fn tautological_clause_is_harmless() {
    check("p cnf 2 2\n1 -1 0\n2 0\n", true);
}

#[test]
fn last_clause_without_trailing_newline() {
    // The final 0 is the last byte of the file; the clause must still
    // be honored, making the formula unsatisfiable.
    check("p cnf 1 2\n1 0\n-1 0", false);
}
