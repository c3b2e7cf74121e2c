//! forksat is a parallel SAT solver for CNF formulas.
//!
//! The engine is plain DPLL: unit propagation over a per-literal
//! occurrence index, chronological backtracking over a decision trail,
//! and a static occurrence-count branching order. Parallelism comes
//! from splitting the search tree near its root: a worker forks the
//! negated decision into a queued sibling state and keeps the decision
//! for itself, so peer threads always explore disjoint branches.

#![deny(missing_docs)]

mod common;
pub mod dpll;
pub mod instance;
pub mod parallel;
pub mod parser;

pub use common::*;
pub use instance::Instance;
pub use parallel::ParallelSolver;
