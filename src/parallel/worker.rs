use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use super::{SharedState, WorkItem, MAX_QUEUED_TASKS};
use crate::dpll::{Propagation, SolverState};

/// One solver thread.
pub(crate) struct Worker {
    handle: JoinHandle<()>,
}

impl Worker {
    pub(crate) fn spawn(id: usize, shared: Arc<SharedState>) -> Worker {
        let handle = thread::Builder::new()
            .name(format!("forksat-worker-{}", id))
            .spawn(move || worker_loop(id, shared))
            .expect("failed to spawn worker thread");
        Worker { handle }
    }

    pub(crate) fn join(self) {
        let _ = self.handle.join();
    }
}

/// Dequeue work items until poisoned.
///
/// A branch that turns out satisfiable latches the model, raises the
/// solved flag and poisons every peer. A branch exhausted as
/// unsatisfiable retires one unit of outstanding work; the worker that
/// retires the last unit poisons the others. Either way the concluding
/// worker exits immediately.
fn worker_loop(id: usize, shared: Arc<SharedState>) {
    loop {
        match shared.work_queue.get() {
            WorkItem::Poison => return,
            WorkItem::Task(mut state) => {
                if run(&mut state, &shared) {
                    log::debug!("worker {} found a satisfying assignment", id);
                    {
                        let mut model = shared.model.lock().unwrap();
                        if model.is_none() {
                            *model = Some(state.model());
                        }
                    }
                    shared.found_solution.store(true, Ordering::Release);
                    shared.broadcast_poison();
                    return;
                }
                if shared.work_items.fetch_sub(1, Ordering::AcqRel) == 1 {
                    log::debug!("worker {} retired the last open branch", id);
                    shared.broadcast_poison();
                    return;
                }
            }
        }
    }
}

/// The DPLL loop of `SolverState::solve`, with branch splitting.
///
/// Near the top of the search tree (and while the queue has room) the
/// negated decision is forked off as a sibling task for a peer worker.
/// The local branch then carries its half of the split as a
/// NON-decision: the sibling owns the other polarity, so this branch
/// must never flip back to it.
fn run(state: &mut SolverState, shared: &SharedState) -> bool {
    let instance = &shared.instance;
    loop {
        if state.unit_propagate(instance) == Propagation::Conflict {
            if !state.backtrack() {
                return false;
            }
        } else if state.n_assigns() == instance.n_vars() {
            return true;
        } else {
            let decision = state.decide(instance);
            if state.n_assigns() < shared.trail_cutoff
                && shared.work_queue.len() <= MAX_QUEUED_TASKS
            {
                log::trace!("splitting on {} at depth {}", decision, state.n_assigns());
                let mut sibling = state.clone();
                sibling.push_assignment(false, !decision);
                shared.work_items.fetch_add(1, Ordering::AcqRel);
                shared.work_queue.put(WorkItem::Task(sibling));
                state.push_assignment(false, decision);
            } else {
                state.push_assignment(true, decision);
            }
        }
    }
}
