//! The sequential DPLL engine: one search branch over a decision trail.

mod trail;

use crate::{Instance, LBool, Lit};
use trail::Trail;

/// Outcome of a propagation pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Propagation {
    /// Some clause is false under the current partial assignment.
    Conflict,
    /// Every forced literal has been placed on the trail.
    Consistent,
}

/// The mutable state of one search branch.
///
/// Cheap to clone; a clone shares nothing mutable with the original,
/// which is what lets a worker hand a sibling branch to the queue.
#[derive(Clone, Debug)]
pub struct SolverState {
    trail: Trail,
    assignments: Vec<LBool>,
}

impl SolverState {
    /// Create the all-unassigned root state for an instance.
    pub fn new(instance: &Instance) -> Self {
        SolverState {
            trail: Trail::new(),
            assignments: vec![LBool::Undef; instance.n_vars()],
        }
    }

    /// Returns the number of assigned variables.
    pub fn n_assigns(&self) -> usize {
        self.trail.len()
    }

    /// Returns the trail entries, oldest first.
    pub fn trail(&self) -> &[(bool, Lit)] {
        self.trail.entries()
    }

    /// Returns the value of the literal under current partial assignment.
    fn value_lit(&self, p: Lit) -> LBool {
        if p.positive() {
            self.assignments[p.var()]
        } else {
            !self.assignments[p.var()]
        }
    }

    /// Place a literal on the trail and record its polarity.
    pub fn push_assignment(&mut self, is_decision: bool, literal: Lit) {
        debug_assert!(self.assignments[literal.var()] == LBool::Undef);
        self.trail.push(is_decision, literal);
        self.assignments[literal.var()] = literal.positive().into();
    }

    /// Remove the newest trail entry, unassigning its variable.
    pub fn pop_assignment(&mut self) -> Option<(bool, Lit)> {
        let (is_decision, literal) = self.trail.pop()?;
        self.assignments[literal.var()] = LBool::Undef;
        Some((is_decision, literal))
    }

    /// Scan for empty and unit clauses before the search starts.
    ///
    /// An empty clause, or two unit clauses forcing opposite polarities,
    /// makes the instance unsatisfiable outright. Forced units go onto
    /// the trail as non-decisions; duplicates are skipped.
    pub fn initial_processing(&mut self, instance: &Instance) -> Propagation {
        for clause in instance.clauses() {
            if clause.lits.is_empty() {
                return Propagation::Conflict;
            }
            if clause.lits.len() == 1 {
                let unit = clause.lits[0];
                match self.value_lit(unit) {
                    LBool::False => return Propagation::Conflict,
                    LBool::Undef => self.push_assignment(false, unit),
                    LBool::True => {}
                }
            }
        }
        Propagation::Consistent
    }

    /// Extend the trail with every literal forced by the current
    /// assignment, transitively.
    ///
    /// Each newly true literal can only turn clauses containing its
    /// negation unit or false, so only those clauses are visited.
    pub fn unit_propagate(&mut self, instance: &Instance) -> Propagation {
        while let Some(to_apply) = self.trail.next_uncommitted() {
            for &clause_id in instance.clauses_containing(!to_apply) {
                let mut unassigned = 0;
                let mut witness = None;
                let mut satisfied = false;
                for &lit in instance.ith_clause(clause_id).lits.iter() {
                    match self.value_lit(lit) {
                        LBool::True => {
                            satisfied = true;
                            break;
                        }
                        LBool::Undef => {
                            unassigned += 1;
                            witness = Some(lit);
                        }
                        LBool::False => {}
                    }
                }
                if satisfied {
                    continue;
                }
                match witness {
                    None => return Propagation::Conflict,
                    Some(lit) if unassigned == 1 => self.push_assignment(false, lit),
                    Some(_) => {}
                }
            }
            self.trail.commit_one();
        }
        Propagation::Consistent
    }

    /// Pick the branching literal: the most important literal whose
    /// variable is still unassigned. Polarity comes from the ordering.
    pub fn decide(&self, instance: &Instance) -> Lit {
        instance
            .literals_by_importance()
            .iter()
            .copied()
            .find(|lit| self.assignments[lit.var()] == LBool::Undef)
            .unwrap()
    }

    /// Undo the trail through the most recent decision and assert its
    /// negation, as a non-decision so the next conflict unwinds past it.
    ///
    /// Returns false when no decision is left to flip: the branch has
    /// exhausted its search space.
    pub fn backtrack(&mut self) -> bool {
        loop {
            match self.pop_assignment() {
                None => return false,
                Some((true, literal)) => {
                    self.push_assignment(false, !literal);
                    self.trail.rewind();
                    return true;
                }
                Some((false, _)) => {}
            }
        }
    }

    /// Run the chronological DPLL loop to completion on this branch.
    /// Returns true iff a satisfying total assignment was found.
    pub fn solve(&mut self, instance: &Instance) -> bool {
        if self.initial_processing(instance) == Propagation::Conflict {
            return false;
        }
        loop {
            if self.unit_propagate(instance) == Propagation::Conflict {
                if !self.backtrack() {
                    return false;
                }
            } else if self.n_assigns() == instance.n_vars() {
                return true;
            } else {
                let decision = self.decide(instance);
                log::trace!("decision {}", decision);
                self.push_assignment(true, decision);
            }
        }
    }

    /// Returns the assignment as a model vector indexed by var.
    pub fn model(&self) -> Vec<bool> {
        self.assignments.iter().map(|&x| x == LBool::True).collect()
    }
}
