//! Immutable problem description shared by every search branch.

use crate::{Clause, Lit};

/// Weight of a textual occurrence of a literal itself when scoring it.
/// A literal outweighs its negation at equal occurrence counts, and a
/// variable that occurs more often overall outranks a rarer one.
const OWN_OCCURRENCE_WEIGHT: f64 = 1.01;
const NEGATED_OCCURRENCE_WEIGHT: f64 = 1.0;

/// An immutable CNF instance.
///
/// Built once from the parsed clause list and then shared read-only
/// with every worker. Carries the per-literal occurrence index used by
/// unit propagation and the static branching order used by `decide`.
#[derive(Clone, Debug)]
pub struct Instance {
    clauses: Vec<Clause>,
    var_count: usize,
    containing_clauses: Vec<Vec<usize>>,
    literals_by_importance: Vec<Lit>,
}

impl Instance {
    /// Build an instance from its clauses.
    ///
    /// Empty clause lists are legal, as are variables that never occur
    /// in any clause (every variable up to the maximum mentioned one is
    /// part of the instance).
    pub fn new(clauses: Vec<Clause>) -> Self {
        let var_count = clauses
            .iter()
            .flat_map(|clause| clause.lits.iter())
            .map(|lit| lit.var() + 1)
            .max()
            .unwrap_or(0);

        // One bucket per literal, clause ids in textual order. A literal
        // occurring twice in a clause lists that clause twice.
        let mut containing_clauses = vec![vec![]; 2 * var_count];
        for (clause_id, clause) in clauses.iter().enumerate() {
            for lit in clause.lits.iter() {
                containing_clauses[lit.index()].push(clause_id);
            }
        }

        let literals_by_importance = Self::rank_literals(var_count, &containing_clauses);

        Instance {
            clauses,
            var_count,
            containing_clauses,
            literals_by_importance,
        }
    }

    fn rank_literals(var_count: usize, containing_clauses: &[Vec<usize>]) -> Vec<Lit> {
        let score = |lit: Lit| -> f64 {
            OWN_OCCURRENCE_WEIGHT * containing_clauses[lit.index()].len() as f64
                + NEGATED_OCCURRENCE_WEIGHT * containing_clauses[(!lit).index()].len() as f64
        };

        let mut ranked: Vec<Lit> = (0..2 * var_count).map(Lit).collect();
        // Descending score; index order breaks exact ties so the
        // ordering is a deterministic function of the clause list.
        ranked.sort_by(|&a, &b| {
            score(b)
                .partial_cmp(&score(a))
                .unwrap()
                .then(a.index().cmp(&b.index()))
        });

        let mut seen = vec![false; var_count];
        let mut by_importance = Vec::with_capacity(var_count);
        for lit in ranked {
            if !seen[lit.var()] {
                seen[lit.var()] = true;
                by_importance.push(lit);
            }
        }
        by_importance
    }

    /// Returns the number of variables in the instance.
    pub fn n_vars(&self) -> usize {
        self.var_count
    }

    /// Returns the number of clauses in the instance.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns the clauses of the instance.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Return's ith clause.
    pub fn ith_clause(&self, i: usize) -> &Clause {
        &self.clauses[i]
    }

    /// Returns the ids of the clauses in which the literal textually occurs.
    pub fn clauses_containing(&self, lit: Lit) -> &[usize] {
        &self.containing_clauses[lit.index()]
    }

    /// Returns one literal per variable, most important first.
    pub fn literals_by_importance(&self) -> &[Lit] {
        &self.literals_by_importance
    }

    /// Verify that the clauses are satisfied by the input model.
    pub fn satisfied_by(&self, model: &[bool]) -> bool {
        self.clauses.iter().all(|Clause { lits }| {
            lits.iter()
                .any(|lit| model.get(lit.var()) == Some(&lit.positive()))
        })
    }
}
