//! Parallel solving: workers cooperating over a shared queue of
//! partial search states.

mod queue;
mod worker;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::dpll::{Propagation, SolverState};
use crate::{Instance, Solution};
use queue::WorkQueue;
use worker::Worker;

/// Admission bound for forked branches: a worker does not split while
/// more tasks than this are already queued. A tuning knob, not an
/// invariant; any consumption order of disjoint branches is correct.
const MAX_QUEUED_TASKS: usize = 128;

/// Fraction of the variable count below which trail depths are
/// considered "near the top" and eligible for splitting.
const TRAIL_CUTOFF_FRACTION: f64 = 0.05;

/// One unit of work handed to a worker.
pub enum WorkItem {
    /// A search branch to run to completion.
    Task(SolverState),
    /// Exit request; one is broadcast per worker at shutdown.
    Poison,
}

/// State shared between the solver handle and every worker.
pub(crate) struct SharedState {
    pub(crate) instance: Instance,
    pub(crate) work_queue: WorkQueue<WorkItem>,
    /// Tasks enqueued or in flight that have not concluded unsatisfiable.
    pub(crate) work_items: AtomicUsize,
    /// Latched once any worker proves its branch satisfiable.
    pub(crate) found_solution: AtomicBool,
    /// Model from the first satisfiable branch.
    pub(crate) model: Mutex<Option<Vec<bool>>>,
    /// Trail depths strictly below this may fork siblings; 0 disables
    /// splitting entirely.
    pub(crate) trail_cutoff: usize,
    thread_count: usize,
}

impl SharedState {
    /// Enqueue one poison token per worker. Safe to call more than
    /// once; surplus tokens are dropped with the queue.
    pub(crate) fn broadcast_poison(&self) {
        for _ in 0..self.thread_count {
            self.work_queue.put(WorkItem::Poison);
        }
    }
}

/// A fixed pool of peer solver threads over one instance.
pub struct ParallelSolver {
    shared: Arc<SharedState>,
    workers: Vec<Worker>,
}

impl ParallelSolver {
    /// Take ownership of the instance and spawn `thread_count` workers.
    /// The workers idle on the queue until [`ParallelSolver::solve`]
    /// seeds it.
    pub fn new(instance: Instance, thread_count: usize) -> Self {
        let thread_count = thread_count.max(1);
        let trail_cutoff = if thread_count == 1 {
            0
        } else {
            (instance.n_vars() as f64 * TRAIL_CUTOFF_FRACTION) as usize
        };

        let shared = Arc::new(SharedState {
            instance,
            work_queue: WorkQueue::new(),
            work_items: AtomicUsize::new(0),
            found_solution: AtomicBool::new(false),
            model: Mutex::new(None),
            trail_cutoff,
            thread_count,
        });

        let workers = (0..thread_count)
            .map(|id| Worker::spawn(id, Arc::clone(&shared)))
            .collect();

        ParallelSolver {
            shared,
            workers,
        }
    }

    /// Solve the instance, blocking until every worker has exited.
    ///
    /// Seeds the root state (after the initial empty/unit clause scan),
    /// then waits out the termination protocol: either some worker
    /// finds a satisfying assignment and poisons the rest, or the last
    /// open branch is retired as unsatisfiable.
    pub fn solve(mut self) -> Solution {
        let mut root = SolverState::new(&self.shared.instance);
        if root.initial_processing(&self.shared.instance) == Propagation::Conflict {
            self.shared.broadcast_poison();
            self.join();
            return Solution::Unsat;
        }

        self.shared.work_items.fetch_add(1, Ordering::AcqRel);
        self.shared.work_queue.put(WorkItem::Task(root));
        self.join();

        log::debug!(
            "{} work items were enqueued in total",
            self.shared.work_queue.total_puts()
        );

        if self.shared.found_solution.load(Ordering::Acquire) {
            let model = self
                .shared
                .model
                .lock()
                .unwrap()
                .take()
                .expect("solved flag raised without a model");
            Solution::Sat(model)
        } else {
            Solution::Unsat
        }
    }

    fn join(&mut self) {
        for worker in self.workers.drain(..) {
            worker.join();
        }
    }
}
